mod common;

mod registrar;

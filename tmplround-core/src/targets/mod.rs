// Source emitters, one module per backend language

pub mod js_src;
pub mod py_src;

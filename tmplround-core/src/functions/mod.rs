// Built-in function plugins - one file per function

pub mod round;

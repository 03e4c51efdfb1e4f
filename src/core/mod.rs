// Core modules implementing the radix grammar, batch conversion, and error modeling.
pub mod convert;
pub mod error;
pub mod radix;

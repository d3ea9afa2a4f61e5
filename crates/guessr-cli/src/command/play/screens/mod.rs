pub use self::picker::*;

mod picker;

//! Canonical string encoding for transaction arguments.
//!
//! The transaction layer carries only strings and bytes, never
//! structured values. Callers convert numbers and booleans here, once,
//! instead of each formatting them ad hoc.

/// Conversion to the canonical transaction-argument string.
pub trait ToTxArg {
    fn to_tx_arg(&self) -> String;
}

impl ToTxArg for String {
    fn to_tx_arg(&self) -> String {
        self.clone()
    }
}

impl ToTxArg for &str {
    fn to_tx_arg(&self) -> String {
        (*self).to_string()
    }
}

impl ToTxArg for bool {
    fn to_tx_arg(&self) -> String {
        if *self { "true".into() } else { "false".into() }
    }
}

macro_rules! numeric_tx_arg {
    ($($t:ty),*) => {
        $(impl ToTxArg for $t {
            fn to_tx_arg(&self) -> String {
                self.to_string()
            }
        })*
    };
}

numeric_tx_arg!(u32, u64, i32, i64, f64);

/// Collect heterogeneous values into one positional argument list.
#[macro_export]
macro_rules! tx_args {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::args::ToTxArg::to_tx_arg(&$value)),*]
    };
}

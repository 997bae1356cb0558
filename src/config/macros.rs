/// Configuration macros for zero-repetition config definitions
///
/// `config_struct!` defines a configuration structure with its defaults in a
/// single declaration and generates:
/// - The struct with public fields
/// - The Default implementation
/// - Serde serialization/deserialization with `#[serde(default)]`
/// - `FIELD_NAMES`, the keys accepted in the struct's TOML table (used to
///   warn about misspelled keys, which serde would otherwise drop silently)
///
/// # Example
/// ```
/// nodepulse::config_struct! {
///     pub struct PollingConfig {
///         interval_secs: u64 = 5,
///         enabled: bool = true,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }

        impl $name {
            pub const FIELD_NAMES: &'static [&'static str] = &[$(stringify!($field_name)),*];
        }
    };
}

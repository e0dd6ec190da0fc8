pub mod config;

/// Declares a serde-enabled config struct whose fields each carry a default value.
/// Fields missing from the input are filled in from `Default`.
#[macro_export]
macro_rules! serializable_struct_with_defaults {
    ( @ $name:ident { } -> ($($fields:tt)*) ($($defaults:tt)*) ) => (
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
        #[serde(default)]
        pub struct $name {
            $($fields)*
        }
        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($defaults)*
                }
            }
        }
    );
    ( @ $name:ident { $(#[$attr:meta])* $param:ident : $type:ty = $default:expr, $($rest:tt)* } -> ($($fields:tt)*) ($($defaults:tt)*) ) => (
        serializable_struct_with_defaults!(@ $name { $($rest)* } -> (
            $($fields)*
            $(#[$attr])*
            pub $param : $type,
        ) (
            $($defaults)*
            $param: $default,
        ));
    );
    ( $name:ident { $( $rest:tt)* } ) => {
        serializable_struct_with_defaults!(@ $name { $($rest)* } -> () ());
    };
}

//! Shared definition of validated, non-empty label types.

/// Defines a newtype over `String` that is trimmed and must not be empty.
macro_rules! define_label {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create the label, rejecting empty or whitespace-only text.
            pub fn new(value: impl Into<String>) -> Result<Self, dam_core::AppError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(dam_core::AppError::validation(concat!(
                        $what,
                        " must not be empty"
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// The label text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = dam_core::AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(label: $name) -> String {
                label.0
            }
        }
    };
}

pub(crate) use define_label;

use std::{borrow::Borrow, fmt, str::FromStr};

use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn is_valid(&self) -> bool {
                !self.0.trim().is_empty()
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<String> for $name {
            fn from(from: String) -> Self {
                Self(from)
            }
        }

        impl From<&str> for $name {
            fn from(from: &str) -> Self {
                from.to_owned().into()
            }
        }

        impl From<$name> for String {
            fn from(from: $name) -> Self {
                from.0
            }
        }

        impl FromStr for $name {
            type Err = ();
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(s.into())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_ref()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }
    };
}

string_id!(
    /// Public identifier of communities and tips.
    Id
);

string_id!(
    /// Identifier of a user that is managed by an external
    /// authentication service.
    UserId
);

string_id!(
    /// Reference to an externally stored message.
    MessageId
);

impl Id {
    pub fn new() -> Self {
        Uuid::new_v4().into()
    }
}

impl From<Uuid> for Id {
    fn from(from: Uuid) -> Self {
        from.as_simple().to_string().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique_and_valid() {
        let a = Id::new();
        let b = Id::new();
        assert!(a.is_valid());
        assert_ne!(a, b);
        assert_eq!(32, a.as_str().len());
    }

    #[test]
    fn blank_user_id_is_invalid() {
        assert!(!UserId::from("  ").is_valid());
        assert!(UserId::from("auth0|42").is_valid());
    }
}

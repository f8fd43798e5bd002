//! Enumerated selector tags
//!
//! Tags compare by exact enum equality. Parsing from text is exact and
//! case-sensitive; text naming no tag is reported as
//! [`RegistryError::UnknownSelector`].

use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Bounds every registry key satisfies
pub trait Selector: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> Selector for T where
    T: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

macro_rules! selector_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every tag, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical text form
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = RegistryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err(RegistryError::UnknownSelector {
                        selector: s.to_string(),
                    }),
                }
            }
        }
    };
}

selector_enum! {
    /// Database backends
    DatabaseKind {
        /// MySQL
        MySql => "mysql",
        /// PostgreSQL
        Postgres => "postgres",
        /// MongoDB
        Mongo => "mongo",
    }
}

selector_enum! {
    /// Payment processors
    PaymentKind {
        /// Card payments via Stripe
        Stripe => "stripe",
        /// PayPal
        PayPal => "paypal",
    }
}

selector_enum! {
    /// Notification channels
    NotificationKind {
        /// E-mail
        Email => "email",
        /// SMS
        Sms => "sms",
        /// Slack workspace
        Slack => "slack",
        /// Microsoft Teams
        Teams => "teams",
    }
}

selector_enum! {
    /// User roles
    RoleKind {
        /// Administrator
        Admin => "admin",
        /// Regular user
        Regular => "regular",
    }
}

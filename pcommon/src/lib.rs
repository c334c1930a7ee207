//! Shared primitives for the patchbay workspace crates.
//!
//! ```rust
//! use pcommon::{SessionId, TraceId, truncate_chars};
//!
//! let session = SessionId::from("call-7f3a");
//! let trace = TraceId::new("trace-1");
//!
//! assert_eq!(session.as_str(), "call-7f3a");
//! assert_eq!(trace.to_string(), "trace-1");
//! assert_eq!(truncate_chars("déjà vu", 4), "déjà");
//! ```

pub mod future {
    //! Boxed future alias shared by the tool and transport traits.
    //!
    //! ```rust
    //! use pcommon::BoxFuture;
    //!
    //! fn status_of<'a>(body: &'a str) -> BoxFuture<'a, u16> {
    //!     Box::pin(async move { if body.is_empty() { 204 } else { 200 } })
    //! }
    //!
    //! let _future = status_of("{}");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Identifier newtypes carried alongside a tool invocation.

    use std::fmt::{Display, Formatter};

    macro_rules! string_id {
        ($name:ident) => {
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name(String);

            impl $name {
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                pub fn as_str(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }
        };
    }

    string_id!(SessionId);
    string_id!(TraceId);
}

pub mod registry {
    //! Name-keyed map used by the tool registry.
    //!
    //! ```rust
    //! use pcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("get_weather".to_string(), 1_u32);
    //!
    //! assert_eq!(registry.get("get_weather"), Some(&1));
    //! assert!(registry.contains_key("get_weather"));
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: HashMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                items: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash,
    {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            self.items.insert(key, value)
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.remove(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.items.keys()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.items.values()
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub mod text {
    //! Small string helpers for log- and agent-facing output.

    /// Returns at most `max_chars` characters of `value`, never splitting a code point.
    pub fn truncate_chars(value: &str, max_chars: usize) -> &str {
        match value.char_indices().nth(max_chars) {
            Some((byte_index, _)) => &value[..byte_index],
            None => value,
        }
    }
}

pub use context::{SessionId, TraceId};
pub use future::BoxFuture;
pub use registry::Registry;
pub use text::truncate_chars;

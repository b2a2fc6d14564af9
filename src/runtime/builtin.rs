//! Conventional actions most grammars end up needing.
//!
//! These are ordinary action functions: register them under any name with
//! [`Actions::define`], or start from [`Actions::with_builtins`] to get both under their
//! conventional names.

use super::executor::Actions;

/// Collect every pending value into a single sequence value
pub fn gather<V: From<Vec<V>>>(vals: Vec<V>) -> V {
    V::from(vals)
}

/// Concatenate every pending value into a single text value
pub fn join<V: From<String> + AsRef<str>>(vals: Vec<V>) -> V {
    V::from(vals.iter().map(|val| val.as_ref()).collect::<String>())
}

impl<V> Actions<V>
where
    V: From<Vec<V>> + From<String> + AsRef<str> + 'static,
{
    /// Action table preloaded with [`gather`] and [`join`] under those names
    pub fn with_builtins() -> Self {
        let mut actions = Self::new();

        actions.define("gather", gather::<V>);
        actions.define("join", join::<V>);

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Val {
        Text(String),
        Seq(Vec<Val>),
    }

    impl From<String> for Val {
        fn from(text: String) -> Self {
            Val::Text(text)
        }
    }

    impl From<Vec<Val>> for Val {
        fn from(vals: Vec<Val>) -> Self {
            Val::Seq(vals)
        }
    }

    impl AsRef<str> for Val {
        fn as_ref(&self) -> &str {
            match self {
                Val::Text(text) => text,
                Val::Seq(_) => "",
            }
        }
    }

    #[test]
    fn gather_wraps_its_arguments() {
        let gathered: Val = gather(vec![
            Val::Text("a".to_string()),
            Val::Text("b".to_string()),
        ]);

        assert_eq!(
            gathered,
            Val::Seq(vec![Val::Text("a".to_string()), Val::Text("b".to_string())])
        );
    }

    #[test]
    fn join_concatenates_its_arguments() {
        let joined: String = join(vec!["pack".to_string(), "rat".to_string()]);

        assert_eq!(joined, "packrat");
    }

    #[test]
    fn with_builtins_registers_the_conventional_names() {
        let actions = Actions::<Val>::with_builtins();

        assert!(actions.contains("gather"));
        assert!(actions.contains("join"));
    }
}

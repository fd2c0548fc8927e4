use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

arena_id!(
    /// Key of a task in the project arena. Version 7, so keys sort by creation.
    TaskId
);

arena_id!(
    /// Identifier of a category log. Survives renames.
    CategoryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_time_ordered_v7() {
        let first = TaskId::new();
        let second = TaskId::new();
        assert_eq!(first.0.get_version_num(), 7);
        assert_ne!(first, second);
        assert_ne!(CategoryId::new(), CategoryId::new());
    }

    #[test]
    fn category_id_parses_its_display_form() {
        let id = CategoryId::new();
        let parsed: CategoryId = id.to_string().parse().expect("must parse category id");
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<CategoryId>().is_err());
    }

    #[test]
    fn task_id_serializes_as_string() {
        let id = TaskId::new();
        let json = serde_json::to_string(&id).expect("must serialize task id");
        assert_eq!(json, format!("\"{id}\""));
        let back: TaskId = serde_json::from_str(&json).expect("must deserialize task id");
        assert_eq!(back, id);
    }
}

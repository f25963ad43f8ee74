use crate::register_toolbelt;

/// Id used when a lookup misses the table.
pub const DEFAULT_USER: &str = "default";

static FAVORITE_NUMBERS: &[(&str, u32)] = &[
    ("alice", 7),
    ("bob", 13),
    ("carol", 21),
    (DEFAULT_USER, 42),
];

pub struct Favorites;

impl Default for Favorites {
    fn default() -> Self {
        Self
    }
}

register_toolbelt! {
    Favorites {
        description: "Per-user favorite number lookup",
        tools: {
            "get_favorite_number" => favorite_number {
                description: "Returns the user's favorite number.",
                params: [
                    "user_id": "string" => "Id of the user whose favorite number is wanted"
                ]
            },
            "get_users_favorite_number" => default_favorite_number {
                description: "Returns the favorite number of the current user.",
                params: []
            }
        }
    }
}

/// Favorite number for `user_id`, or the default entry's number when the id is unknown.
pub fn get_favorite_number(user_id: &str) -> u32 {
    lookup(user_id)
        .or_else(|| lookup(DEFAULT_USER))
        .unwrap_or(42)
}

fn lookup(user_id: &str) -> Option<u32> {
    FAVORITE_NUMBERS
        .iter()
        .find(|(id, _)| *id == user_id)
        .map(|(_, number)| *number)
}

impl Favorites {
    fn favorite_number(&self, args: &serde_json::Value) -> anyhow::Result<String> {
        let user_id = args
            .get("user_id")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_USER);

        Ok(format!("Your favorite number is {}", get_favorite_number(user_id)))
    }

    fn default_favorite_number(&self, _args: &serde_json::Value) -> anyhow::Result<String> {
        Ok(get_favorite_number(DEFAULT_USER).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_users_have_fixed_numbers() {
        assert_eq!(get_favorite_number("alice"), 7);
        assert_eq!(get_favorite_number("bob"), 13);
        assert_eq!(get_favorite_number("carol"), 21);
    }

    #[test]
    fn unknown_user_falls_back_to_default() {
        assert_eq!(get_favorite_number("unknown_user"), 42);
        assert_eq!(get_favorite_number(""), 42);
    }

    #[test]
    fn handler_formats_sentence() {
        let result = favorite_number_handler(&json!({ "user_id": "alice" })).unwrap();
        assert_eq!(result, "Your favorite number is 7");
    }

    #[test]
    fn parameterless_tool_returns_bare_number() {
        assert_eq!(default_favorite_number_handler(&json!({})).unwrap(), "42");
        assert_eq!(TOOLBELT.name, "Favorites");
        assert!(TOOL_SCHEMAS[1].parameters.is_empty());
    }

    #[test]
    fn handler_without_user_id_uses_default() {
        let result = favorite_number_handler(&json!({})).unwrap();
        assert_eq!(result, "Your favorite number is 42");

        let result = favorite_number_handler(&json!({ "user_id": 5 })).unwrap();
        assert_eq!(result, "Your favorite number is 42");
    }
}

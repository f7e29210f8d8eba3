//! Agent action catalog
//!
//! The fixed set of capabilities a storefront agent can be granted. The
//! compiler maps ids to labels for the capabilities line, and the CLI
//! presents the catalog when merchants edit a draft. Ids outside the
//! catalog are not an error; they render verbatim.

use serde::Serialize;

/// One entry in the action catalog
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActionSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Actions available to storefront agents
pub const AVAILABLE_ACTIONS: &[ActionSpec] = &[
    ActionSpec {
        id: "view_products",
        label: "View Products",
        description: "Browse and search product catalog",
    },
    ActionSpec {
        id: "create_order",
        label: "Create Orders",
        description: "Help customers place orders",
    },
    ActionSpec {
        id: "apply_discount",
        label: "Apply Discounts",
        description: "Apply promotional discounts",
    },
    ActionSpec {
        id: "answer_questions",
        label: "Answer Questions",
        description: "Respond to customer inquiries",
    },
    ActionSpec {
        id: "check_order_status",
        label: "Check Order Status",
        description: "Look up order information",
    },
    ActionSpec {
        id: "process_returns",
        label: "Process Returns",
        description: "Handle return requests",
    },
];

/// Look up a catalog entry by id
pub fn find(id: &str) -> Option<&'static ActionSpec> {
    AVAILABLE_ACTIONS.iter().find(|a| a.id == id)
}

/// Resolve an action id to its display label, falling back to the raw id
/// for ids outside the catalog
pub fn label_for(id: &str) -> &str {
    find(id).map(|a| a.label).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_action() {
        let action = find("create_order").unwrap();
        assert_eq!(action.label, "Create Orders");
        assert_eq!(action.description, "Help customers place orders");
    }

    #[test]
    fn test_find_unknown_action() {
        assert!(find("launch_rockets").is_none());
    }

    #[test]
    fn test_label_for_falls_back_to_id() {
        assert_eq!(label_for("view_products"), "View Products");
        assert_eq!(label_for("custom_thing"), "custom_thing");
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<&str> = AVAILABLE_ACTIONS.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), AVAILABLE_ACTIONS.len());
    }
}

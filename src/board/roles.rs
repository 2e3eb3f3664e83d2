//! Role catalog: the fixed set of role tags a slot can carry

use crate::color::{HexColor, palette};

/// Visual grouping of roles, drives slot styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Assault,
    Leader,
    Demolition,
    Marksman,
    Staff,
}

impl RoleCategory {
    pub fn accent(self) -> HexColor {
        match self {
            RoleCategory::Assault => palette::RED_500,
            RoleCategory::Leader => palette::YELLOW_500,
            RoleCategory::Demolition => palette::ORANGE_500,
            RoleCategory::Marksman => palette::CYAN_500,
            RoleCategory::Staff => palette::PURPLE_500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub id: &'static str,
    pub label: &'static str,
    pub category: RoleCategory,
}

const ROLES: &[Role] = &[
    Role { id: "rush1", label: "RUSH 1", category: RoleCategory::Assault },
    Role { id: "rush2", label: "RUSH 2", category: RoleCategory::Assault },
    Role { id: "cpt", label: "CPT", category: RoleCategory::Leader },
    Role { id: "bomba", label: "BOMBA", category: RoleCategory::Demolition },
    Role { id: "sniper", label: "SNIPER", category: RoleCategory::Marksman },
    Role { id: "coach", label: "COACH", category: RoleCategory::Staff },
];

pub fn roles_list() -> &'static [Role] {
    ROLES
}

pub fn find_role_by_label(label: &str) -> Option<&'static Role> {
    ROLES.iter().find(|role| role.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_list_order() {
        let labels: Vec<&str> = roles_list().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["RUSH 1", "RUSH 2", "CPT", "BOMBA", "SNIPER", "COACH"]);
    }

    #[test]
    fn test_find_role_by_label() {
        let sniper = find_role_by_label("SNIPER").unwrap();
        assert_eq!(sniper.id, "sniper");
        assert_eq!(sniper.category, RoleCategory::Marksman);
        assert_eq!(find_role_by_label("COACH").unwrap().category, RoleCategory::Staff);
    }

    #[test]
    fn test_find_role_is_exact_match() {
        assert!(find_role_by_label("sniper").is_none());
        assert!(find_role_by_label("POSSIBILIDADE").is_none());
    }
}

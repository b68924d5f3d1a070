//! Per-route role requirements.
//!
//! Which roles may call a route group is deployment configuration, not code:
//! each group reads a comma-separated list from its own variable and the
//! router builds one role gate per group from it.
//!
//! # Environment Variables
//!
//! - `ROLES_BATCHES`: roles allowed on `/api/batches` (default: `academic`)
//! - `ROLES_COURSES`: roles allowed on `/api/courses` (default: `academic`)
//! - `ROLES_STUDENTS`: roles allowed on `/api/students` (default: `academic`)
//!
//! # Example
//!
//! ```text
//! ROLES_BATCHES=academic,manager
//! ROLES_COURSES=manager
//! ```

use std::collections::HashMap;

/// Role granted access when a group has no explicit configuration.
pub const DEFAULT_ROLE: &str = "academic";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    Batches,
    Courses,
    Students,
}

impl RouteGroup {
    pub const ALL: [RouteGroup; 3] = [RouteGroup::Batches, RouteGroup::Courses, RouteGroup::Students];

    pub fn env_key(self) -> &'static str {
        match self {
            RouteGroup::Batches => "ROLES_BATCHES",
            RouteGroup::Courses => "ROLES_COURSES",
            RouteGroup::Students => "ROLES_STUDENTS",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteGroup::Batches => "batches",
            RouteGroup::Courses => "courses",
            RouteGroup::Students => "students",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRoles {
    roles: HashMap<RouteGroup, Vec<String>>,
}

impl Default for RouteRoles {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl RouteRoles {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let roles = RouteGroup::ALL
            .into_iter()
            .map(|group| {
                let configured = lookup(group.env_key())
                    .map(|value| parse_role_list(&value))
                    .unwrap_or_default();
                let roles = if configured.is_empty() {
                    vec![DEFAULT_ROLE.to_string()]
                } else {
                    configured
                };
                (group, roles)
            })
            .collect();

        Self { roles }
    }

    /// Replaces the roles of one group. Empty lists are ignored.
    pub fn with_roles<I, S>(mut self, group: RouteGroup, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles
            .into_iter()
            .map(Into::into)
            .map(|role| role.trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        if !roles.is_empty() {
            self.roles.insert(group, roles);
        }
        self
    }

    pub fn roles_for(&self, group: RouteGroup) -> &[String] {
        self.roles.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn parse_role_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_academic() {
        let roles = RouteRoles::default();
        for group in RouteGroup::ALL {
            assert_eq!(roles.roles_for(group), ["academic".to_string()]);
        }
    }

    #[test]
    fn test_per_group_configuration() {
        let roles = RouteRoles::from_lookup(|key| match key {
            "ROLES_BATCHES" => Some("academic, manager".to_string()),
            "ROLES_COURSES" => Some("manager".to_string()),
            _ => None,
        });

        assert_eq!(
            roles.roles_for(RouteGroup::Batches),
            ["academic".to_string(), "manager".to_string()]
        );
        assert_eq!(roles.roles_for(RouteGroup::Courses), ["manager".to_string()]);
        assert_eq!(roles.roles_for(RouteGroup::Students), ["academic".to_string()]);
    }

    #[test]
    fn test_blank_entries_fall_back_to_default() {
        let roles = RouteRoles::from_lookup(|key| {
            (key == "ROLES_STUDENTS").then(|| " , ,".to_string())
        });
        assert_eq!(roles.roles_for(RouteGroup::Students), ["academic".to_string()]);
    }

    #[test]
    fn test_with_roles_overrides_group() {
        let roles = RouteRoles::default().with_roles(RouteGroup::Courses, ["manager", " "]);
        assert_eq!(roles.roles_for(RouteGroup::Courses), ["manager".to_string()]);

        let unchanged = RouteRoles::default().with_roles(RouteGroup::Courses, Vec::<String>::new());
        assert_eq!(unchanged.roles_for(RouteGroup::Courses), ["academic".to_string()]);
    }
}

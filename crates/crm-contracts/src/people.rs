//! User, role and team rules

use crm_core::ValidationErrors;
use crm_models::{Role, RoleDto, Team, TeamDto, User, UserDto};

use crate::base::DtoRules;
use crate::rules;

impl DtoRules for User {
    fn check(dto: &UserDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.username, "username", "Username", 100, errors);
        if dto.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else {
            rules::email(&dto.email, "email", errors);
        }
        rules::require_text(&dto.first_name, "firstName", "First name", 100, errors);
        rules::require_text(&dto.last_name, "lastName", "Last name", 100, errors);
    }
}

impl DtoRules for Role {
    fn check(dto: &RoleDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.name, "name", "Role name", 100, errors);
        rules::optional_max_length(dto.description.as_deref(), "description", "Description", 255, errors);
    }
}

impl DtoRules for Team {
    fn check(dto: &TeamDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.name, "name", "Team name", 100, errors);
        rules::optional_max_length(dto.description.as_deref(), "description", "Description", 255, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_user_rules() {
        let dto = UserDto {
            id: Uuid::new_v4(),
            username: "jdoe".into(),
            email: "jdoe-at-example".into(),
            first_name: "Jane".into(),
            last_name: "".into(),
            role_id: None,
            team_id: None,
        };

        let mut errors = ValidationErrors::new();
        User::check(&dto, &mut errors);
        assert_eq!(
            errors.messages(),
            vec!["Email address is not valid", "Last name is required"]
        );
    }
}

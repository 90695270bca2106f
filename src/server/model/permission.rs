//! Ticket-management capabilities and transition guards.
//!
//! Guards are pure functions over the actor's resolved capabilities; the
//! data needed to resolve them (staff-role rows, the actor's Discord roles,
//! the ADMINISTRATOR bit) is fetched by the permission service and the bot
//! handler.

/// A ticket-management action requiring a capability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketAction {
    View,
    Assign,
    Close,
    Delete,
    Reopen,
    ManagePanels,
}

/// Union of capabilities granted by the actor's staff roles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub view: bool,
    pub assign: bool,
    pub close: bool,
    pub delete: bool,
    pub reopen: bool,
    pub manage_panels: bool,
}

impl Capabilities {
    /// Everything granted; used for the ADMINISTRATOR override.
    pub fn all() -> Self {
        Self {
            view: true,
            assign: true,
            close: true,
            delete: true,
            reopen: true,
            manage_panels: true,
        }
    }

    /// Folds the staff-role rows matching the actor's Discord roles into a
    /// single capability set.
    pub fn from_staff_roles(
        staff_roles: &[entity::staff_role::Model],
        member_roles: &[u64],
    ) -> Self {
        let mut caps = Self::default();

        for staff in staff_roles {
            let Ok(role_id) = staff.role_id.parse::<u64>() else {
                continue;
            };
            if !member_roles.contains(&role_id) {
                continue;
            }

            caps.view |= staff.can_view;
            caps.assign |= staff.can_assign;
            caps.close |= staff.can_close;
            caps.delete |= staff.can_delete;
            caps.reopen |= staff.can_reopen;
            caps.manage_panels |= staff.can_manage_panels;
        }

        caps
    }

    pub fn allows(&self, action: TicketAction) -> bool {
        match action {
            TicketAction::View => self.view,
            TicketAction::Assign => self.assign,
            TicketAction::Close => self.close,
            TicketAction::Delete => self.delete,
            TicketAction::Reopen => self.reopen,
            TicketAction::ManagePanels => self.manage_panels,
        }
    }
}

/// Decides whether an actor may perform `action` on a ticket.
///
/// - The ADMINISTRATOR permission is a standing override for everything.
/// - The ticket's creator may close (only close) their own ticket without
///   any staff capability.
/// - Everything else requires the matching capability from the actor's
///   staff roles.
pub fn can_perform(
    caps: Capabilities,
    is_admin: bool,
    is_ticket_owner: bool,
    action: TicketAction,
) -> bool {
    if is_admin {
        return true;
    }

    if is_ticket_owner && action == TicketAction::Close {
        return true;
    }

    caps.allows(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff_role(role_id: &str, close: bool, delete: bool, reopen: bool) -> entity::staff_role::Model {
        entity::staff_role::Model {
            id: 1,
            guild_id: "1".to_string(),
            role_id: role_id.to_string(),
            can_view: true,
            can_assign: false,
            can_close: close,
            can_delete: delete,
            can_reopen: reopen,
            can_manage_panels: false,
        }
    }

    #[test]
    fn admin_override_grants_everything() {
        let caps = Capabilities::default();
        for action in [
            TicketAction::View,
            TicketAction::Assign,
            TicketAction::Close,
            TicketAction::Delete,
            TicketAction::Reopen,
            TicketAction::ManagePanels,
        ] {
            assert!(can_perform(caps, true, false, action));
        }
    }

    #[test]
    fn owner_can_close_but_not_reopen_or_delete() {
        let caps = Capabilities::default();

        assert!(can_perform(caps, false, true, TicketAction::Close));
        assert!(!can_perform(caps, false, true, TicketAction::Reopen));
        assert!(!can_perform(caps, false, true, TicketAction::Delete));
    }

    #[test]
    fn capabilities_union_across_roles() {
        let staff = vec![
            staff_role("100", true, false, false),
            staff_role("200", false, false, true),
        ];

        let caps = Capabilities::from_staff_roles(&staff, &[100, 200]);
        assert!(caps.close);
        assert!(caps.reopen);
        assert!(!caps.delete);
    }

    #[test]
    fn roles_not_held_grant_nothing() {
        let staff = vec![staff_role("100", true, true, true)];

        let caps = Capabilities::from_staff_roles(&staff, &[999]);
        assert_eq!(caps, Capabilities::default());
        assert!(!can_perform(caps, false, false, TicketAction::Close));
    }

    #[test]
    fn unparseable_role_ids_are_skipped() {
        let staff = vec![staff_role("not-a-number", true, true, true)];

        let caps = Capabilities::from_staff_roles(&staff, &[100]);
        assert_eq!(caps, Capabilities::default());
    }
}

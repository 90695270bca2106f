//! Typed decoding of component and modal custom ids.
//!
//! Discord routes component interactions back to us with nothing but the
//! `custom_id` string we attached when posting the component. These enums
//! are the single place that string is produced and parsed; handlers match
//! on variants, never on prefixes.

/// Action carried by a button interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentAction {
    /// Panel button: start the ticket-creation flow for a registered type.
    OpenTicket { panel_id: i32, ticket_type_id: i32 },
    /// Close button inside a ticket channel.
    Close { ticket_pk: i32 },
    /// Reopen button on the closed notice.
    Reopen { ticket_pk: i32 },
    /// Delete button; replies with a confirmation prompt.
    Delete { ticket_pk: i32 },
    /// Second, confirming click that actually deletes.
    DeleteConfirm { ticket_pk: i32 },
}

impl ComponentAction {
    /// Encodes the action as a component custom id.
    pub fn encode(&self) -> String {
        match self {
            Self::OpenTicket {
                panel_id,
                ticket_type_id,
            } => format!("ticket_open:{}:{}", panel_id, ticket_type_id),
            Self::Close { ticket_pk } => format!("ticket_close:{}", ticket_pk),
            Self::Reopen { ticket_pk } => format!("ticket_reopen:{}", ticket_pk),
            Self::Delete { ticket_pk } => format!("ticket_delete:{}", ticket_pk),
            Self::DeleteConfirm { ticket_pk } => format!("ticket_delete_confirm:{}", ticket_pk),
        }
    }

    /// Decodes a custom id; `None` for ids this bot did not produce.
    pub fn parse(custom_id: &str) -> Option<Self> {
        let (kind, rest) = custom_id.split_once(':')?;

        match kind {
            "ticket_open" => {
                let (panel_id, ticket_type_id) = rest.split_once(':')?;
                Some(Self::OpenTicket {
                    panel_id: panel_id.parse().ok()?,
                    ticket_type_id: ticket_type_id.parse().ok()?,
                })
            }
            "ticket_close" => Some(Self::Close {
                ticket_pk: rest.parse().ok()?,
            }),
            "ticket_reopen" => Some(Self::Reopen {
                ticket_pk: rest.parse().ok()?,
            }),
            "ticket_delete" => Some(Self::Delete {
                ticket_pk: rest.parse().ok()?,
            }),
            "ticket_delete_confirm" => Some(Self::DeleteConfirm {
                ticket_pk: rest.parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// Action carried by a modal submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalAction {
    /// Answers to the ticket-creation questions for a registered type.
    OpenTicket { panel_id: i32, ticket_type_id: i32 },
}

impl ModalAction {
    pub fn encode(&self) -> String {
        match self {
            Self::OpenTicket {
                panel_id,
                ticket_type_id,
            } => format!("ticket_modal:{}:{}", panel_id, ticket_type_id),
        }
    }

    pub fn parse(custom_id: &str) -> Option<Self> {
        let (kind, rest) = custom_id.split_once(':')?;

        match kind {
            "ticket_modal" => {
                let (panel_id, ticket_type_id) = rest.split_once(':')?;
                Some(Self::OpenTicket {
                    panel_id: panel_id.parse().ok()?,
                    ticket_type_id: ticket_type_id.parse().ok()?,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_actions_round_trip() {
        let actions = [
            ComponentAction::OpenTicket {
                panel_id: 3,
                ticket_type_id: 7,
            },
            ComponentAction::Close { ticket_pk: 42 },
            ComponentAction::Reopen { ticket_pk: 42 },
            ComponentAction::Delete { ticket_pk: 42 },
            ComponentAction::DeleteConfirm { ticket_pk: 42 },
        ];

        for action in actions {
            assert_eq!(ComponentAction::parse(&action.encode()), Some(action));
        }
    }

    #[test]
    fn modal_actions_round_trip() {
        let action = ModalAction::OpenTicket {
            panel_id: 3,
            ticket_type_id: 7,
        };
        assert_eq!(ModalAction::parse(&action.encode()), Some(action));
    }

    #[test]
    fn delete_and_delete_confirm_are_distinct() {
        let delete = ComponentAction::Delete { ticket_pk: 1 }.encode();
        let confirm = ComponentAction::DeleteConfirm { ticket_pk: 1 }.encode();

        assert_ne!(delete, confirm);
        assert_eq!(
            ComponentAction::parse(&confirm),
            Some(ComponentAction::DeleteConfirm { ticket_pk: 1 })
        );
    }

    #[test]
    fn foreign_ids_decode_to_none() {
        assert_eq!(ComponentAction::parse("unrelated_button"), None);
        assert_eq!(ComponentAction::parse("ticket_close:"), None);
        assert_eq!(ComponentAction::parse("ticket_close:abc"), None);
        assert_eq!(ComponentAction::parse("ticket_open:1"), None);
        assert_eq!(ModalAction::parse("ticket_close:1"), None);
    }
}

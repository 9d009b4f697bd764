// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for notification fan-out and per-recipient reads.

use helpdesk::{FanOut, NotificationKind};
use helpdesk_domain::{PermissionSet, Role, Ticket};
use helpdesk_persistence::Persistence;

use crate::dispatch::dispatch_notifications;
use crate::error::ApiError;
use crate::handlers::{delete_notification, list_notifications, mark_notification_read};
use crate::tests::helpers::{
    LATER, NOW, it_caller, mem, open_ticket, seed_staff, user_caller,
};

#[test]
fn test_create_broadcasts_to_viewing_staff_not_requester() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 1, Role::Admin);
    seed_staff(&mut p, 7, Role::ItSupport);
    seed_staff(&mut p, 100, Role::User);

    // Opened by user 100, who is also in the directory.
    open_ticket(&mut p, "Broadcast me");

    assert_eq!(list_notifications(&mut p, &it_caller(1)).unwrap().len(), 1);
    assert_eq!(list_notifications(&mut p, &it_caller(7)).unwrap().len(), 1);
    assert!(list_notifications(&mut p, &user_caller(100)).unwrap().is_empty());
}

#[test]
fn test_broadcast_skips_roles_without_view() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    seed_staff(&mut p, 101, Role::User);
    let mut flags: PermissionSet = PermissionSet::default_for(Role::User);
    flags.view_tickets = false;
    p.set_role_permissions(Role::User, &flags).unwrap();

    open_ticket(&mut p, "Selective");

    assert_eq!(list_notifications(&mut p, &it_caller(7)).unwrap().len(), 1);
    assert!(list_notifications(&mut p, &user_caller(101)).unwrap().is_empty());
}

#[test]
fn test_replayed_dispatch_inserts_nothing() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let info = open_ticket(&mut p, "Replayed");
    let ticket: Ticket = p.get_ticket(info.ticket_id).unwrap().unwrap();

    // Same transition instant, so every row hits the dedupe key.
    let inserted: usize = dispatch_notifications(
        &mut p,
        &ticket,
        &FanOut::BroadcastToStaff,
        NotificationKind::TicketCreated,
        NOW,
        LATER,
    );
    assert_eq!(inserted, 0);
    assert_eq!(list_notifications(&mut p, &it_caller(7)).unwrap().len(), 1);
}

#[test]
fn test_update_notifies_requester_only() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    seed_staff(&mut p, 8, Role::ItSupport);
    let info = open_ticket(&mut p, "Accepted later");

    crate::handlers::accept_ticket(&mut p, &it_caller(7), info.ticket_id, LATER).unwrap();

    let requester_rows = list_notifications(&mut p, &user_caller(100)).unwrap();
    assert_eq!(requester_rows.len(), 1);
    assert_eq!(requester_rows[0].kind, "ticket_updated");
    // The other staff member only saw the creation broadcast.
    assert_eq!(list_notifications(&mut p, &it_caller(8)).unwrap().len(), 1);
}

#[test]
fn test_mark_read_and_delete_are_recipient_scoped() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    open_ticket(&mut p, "Scoped");
    let id: i64 = list_notifications(&mut p, &it_caller(7)).unwrap()[0].notification_id;

    let err: ApiError = mark_notification_read(&mut p, &it_caller(8), id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));

    mark_notification_read(&mut p, &it_caller(7), id).unwrap();
    assert!(list_notifications(&mut p, &it_caller(7)).unwrap()[0].is_read);

    delete_notification(&mut p, &it_caller(7), id).unwrap();
    assert!(list_notifications(&mut p, &it_caller(7)).unwrap().is_empty());
}

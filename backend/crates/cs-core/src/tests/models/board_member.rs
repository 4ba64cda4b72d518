use crate::{BoardMember, BoardRole, Permission};

use std::str::FromStr;

use googletest::prelude::*;
use uuid::Uuid;

#[test]
fn given_admin_role_when_checking_permissions_then_all_granted() {
    assert_that!(BoardRole::Admin.has_permission(Permission::View), is_true());
    assert_that!(BoardRole::Admin.has_permission(Permission::Edit), is_true());
    assert_that!(BoardRole::Admin.has_permission(Permission::Admin), is_true());
}

#[test]
fn given_member_role_when_checking_permissions_then_edit_but_not_admin() {
    assert_that!(BoardRole::Member.has_permission(Permission::View), is_true());
    assert_that!(BoardRole::Member.has_permission(Permission::Edit), is_true());
    assert_that!(
        BoardRole::Member.has_permission(Permission::Admin),
        is_false()
    );
}

#[test]
fn given_viewer_role_when_checking_permissions_then_view_only() {
    assert_that!(BoardRole::Viewer.has_permission(Permission::View), is_true());
    assert_that!(
        BoardRole::Viewer.has_permission(Permission::Edit),
        is_false()
    );
    assert_that!(
        BoardRole::Viewer.has_permission(Permission::Admin),
        is_false()
    );
}

#[test]
fn given_role_strings_when_parsed_then_round_trip() {
    for role in [BoardRole::Admin, BoardRole::Member, BoardRole::Viewer] {
        assert_that!(BoardRole::from_str(role.as_str()).unwrap(), eq(role));
    }
}

#[test]
fn given_unknown_role_string_when_parsed_then_error() {
    assert_that!(BoardRole::from_str("superuser"), err(anything()));
}

#[test]
fn given_new_member_when_created_then_delegates_role_permission() {
    let member = BoardMember::new(Uuid::new_v4(), Uuid::new_v4(), BoardRole::Viewer);
    assert_that!(member.has_permission(Permission::Edit), is_false());
}

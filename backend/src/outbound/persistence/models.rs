//! Internal Diesel row structs.
//!
//! Rows never leave the persistence module; repositories convert them to
//! domain records and re-validate every stored value on the way out.

use diesel::prelude::*;

use super::schema::{links, profile_customizations, usernames};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = usernames)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UsernameRow {
    pub owner_id: String,
    pub handle: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = usernames)]
pub(crate) struct NewUsernameRow<'a> {
    pub owner_id: &'a str,
    pub handle: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LinkRow {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub url: String,
    pub sort_order: i64,
}

/// Content edit; leaves `sort_order` untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = links)]
pub(crate) struct LinkContentUpdate<'a> {
    pub title: &'a str,
    pub url: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profile_customizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomizationRow {
    pub owner_id: String,
    pub description: Option<String>,
    pub accent_color: Option<String>,
}

/// Insert-or-replace payload; `None` columns end up NULL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profile_customizations)]
pub(crate) struct CustomizationUpsert<'a> {
    pub owner_id: &'a str,
    pub description: Option<&'a str>,
    pub accent_color: Option<&'a str>,
}

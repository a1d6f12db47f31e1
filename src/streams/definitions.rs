//! The Tally stream catalog
//!
//! Endpoint shapes follow the Tally REST API: organization-scoped
//! member listings, page-numbered form/workspace/webhook listings, and
//! per-form questions and submissions.

use super::{Pagination, Partitioning, Replication, StreamDef};
use crate::pagination::StopCondition;
use crate::schema::{JsonSchema, SchemaProperty};
use std::collections::BTreeMap;

/// Forms page size
const FORMS_PAGE_SIZE: u32 = 500;
/// Webhooks page size
const WEBHOOKS_PAGE_SIZE: u32 = 100;

/// All streams, in sync order (parents before children)
pub fn catalog() -> Vec<StreamDef> {
    vec![
        users(),
        invites(),
        forms(),
        questions(),
        submissions(),
        workspaces(),
        webhooks(),
    ]
}

fn users() -> StreamDef {
    StreamDef {
        name: "users",
        path: "/organizations/{organizationId}/users",
        params: &[],
        records_path: None,
        primary_key: &["id"],
        pagination: Pagination::None,
        partitioning: Partitioning::Organization,
        replication: None,
        schema: users_schema(),
    }
}

fn invites() -> StreamDef {
    StreamDef {
        name: "invites",
        path: "/organizations/{organizationId}/invites",
        params: &[],
        records_path: None,
        primary_key: &["id"],
        pagination: Pagination::None,
        partitioning: Partitioning::Organization,
        replication: None,
        schema: JsonSchema::new()
            .with_property("id", SchemaProperty::string())
            .with_property("organizationId", SchemaProperty::string())
            .with_property("email", SchemaProperty::email())
            .with_property("createdAt", SchemaProperty::date_time())
            .with_property("updatedAt", SchemaProperty::date_time()),
    }
}

fn forms() -> StreamDef {
    StreamDef {
        name: "forms",
        path: "/forms",
        params: &[],
        records_path: Some("$.items[*]"),
        primary_key: &["id"],
        pagination: Pagination::PageNumber {
            page_size: Some(FORMS_PAGE_SIZE),
            stop: StopCondition::EmptyPage,
        },
        partitioning: Partitioning::None,
        replication: None,
        schema: JsonSchema::new()
            .with_property("id", SchemaProperty::string())
            .with_property("name", SchemaProperty::string())
            .with_property("workspaceId", SchemaProperty::string())
            .with_property("status", SchemaProperty::string())
            .with_property("numberOfSubmissions", SchemaProperty::integer())
            .with_property("isClosed", SchemaProperty::boolean())
            .with_property("createdAt", SchemaProperty::date_time())
            .with_property("updatedAt", SchemaProperty::date_time())
            .with_property(
                "payments",
                SchemaProperty::object(properties([
                    ("amount", SchemaProperty::number()),
                    ("currency", SchemaProperty::string()),
                ])),
            ),
    }
}

fn questions() -> StreamDef {
    StreamDef {
        name: "questions",
        path: "/forms/{formId}/questions",
        params: &[],
        records_path: Some("$.questions[*]"),
        primary_key: &["id"],
        pagination: Pagination::None,
        partitioning: Partitioning::Parent {
            parent: "forms",
            parent_key: "id",
            field: "formId",
        },
        replication: None,
        schema: JsonSchema::new()
            .with_property("id", SchemaProperty::string())
            .with_property("type", SchemaProperty::string())
            .with_property("title", SchemaProperty::string())
            .with_property("isTitleModifiedByUser", SchemaProperty::boolean())
            .with_property("formId", SchemaProperty::string())
            .with_property("isDeleted", SchemaProperty::boolean())
            .with_property("numberOfResponses", SchemaProperty::integer())
            .with_property("createdAt", SchemaProperty::date_time())
            .with_property("updatedAt", SchemaProperty::date_time())
            .with_property(
                "fields",
                SchemaProperty::array(SchemaProperty::object(properties([
                    ("uuid", SchemaProperty::string()),
                    ("type", SchemaProperty::string()),
                    ("blockGroupUuid", SchemaProperty::string()),
                    ("title", SchemaProperty::string()),
                ]))),
            )
            .with_property("hasResponses", SchemaProperty::boolean()),
    }
}

fn submissions() -> StreamDef {
    StreamDef {
        name: "submissions",
        path: "/forms/{formId}/submissions",
        params: &[("filter", "all")],
        records_path: Some("$.submissions[*]"),
        primary_key: &["id"],
        pagination: Pagination::PageNumber {
            page_size: None,
            stop: StopCondition::field("$.hasMore", false),
        },
        partitioning: Partitioning::Parent {
            parent: "forms",
            parent_key: "id",
            field: "formId",
        },
        replication: Some(Replication {
            key: "submittedAt",
            request_param: Some("startDate"),
        }),
        schema: JsonSchema::new()
            .with_property("id", SchemaProperty::string())
            .with_property("formId", SchemaProperty::string())
            .with_property("isCompleted", SchemaProperty::boolean())
            .with_property("submittedAt", SchemaProperty::date_time())
            .with_property(
                "responses",
                SchemaProperty::array(SchemaProperty::object(properties([
                    ("questionId", SchemaProperty::string()),
                    ("value", SchemaProperty::any()),
                ]))),
            ),
    }
}

fn workspaces() -> StreamDef {
    StreamDef {
        name: "workspaces",
        path: "/workspaces",
        params: &[],
        records_path: Some("$.items[*]"),
        primary_key: &["id"],
        pagination: Pagination::PageNumber {
            page_size: None,
            stop: StopCondition::EmptyPage,
        },
        partitioning: Partitioning::None,
        replication: None,
        schema: JsonSchema::new()
            .with_property("id", SchemaProperty::string())
            .with_property("name", SchemaProperty::string())
            .with_property("members", SchemaProperty::array(member_schema()))
            .with_property(
                "invites",
                SchemaProperty::array(SchemaProperty::object(properties([
                    ("id", SchemaProperty::string()),
                    ("email", SchemaProperty::email()),
                    (
                        "workspaceIds",
                        SchemaProperty::array(SchemaProperty::string()),
                    ),
                ]))),
            )
            .with_property("createdByUserId", SchemaProperty::string())
            .with_property("createdAt", SchemaProperty::date_time())
            .with_property("updatedAt", SchemaProperty::date_time()),
    }
}

fn webhooks() -> StreamDef {
    StreamDef {
        name: "webhooks",
        path: "/webhooks",
        params: &[],
        records_path: Some("$.webhooks[*]"),
        primary_key: &["id"],
        pagination: Pagination::PageNumber {
            page_size: Some(WEBHOOKS_PAGE_SIZE),
            stop: StopCondition::total_count("$.total"),
        },
        partitioning: Partitioning::None,
        replication: None,
        schema: JsonSchema::new()
            .with_property("id", SchemaProperty::string())
            .with_property("formId", SchemaProperty::string())
            .with_property("url", SchemaProperty::uri())
            .with_property("signingSecret", SchemaProperty::string())
            .with_property(
                "httpHeaders",
                SchemaProperty::array(SchemaProperty::object(properties([
                    ("name", SchemaProperty::string()),
                    ("value", SchemaProperty::string()),
                ]))),
            )
            .with_property("eventTypes", SchemaProperty::array(SchemaProperty::string()))
            .with_property("externalSubscriber", SchemaProperty::string())
            .with_property("isEnabled", SchemaProperty::boolean())
            .with_property("lastSyncedAt", SchemaProperty::date_time())
            .with_property("createdAt", SchemaProperty::date_time())
            .with_property("updatedAt", SchemaProperty::date_time()),
    }
}

fn users_schema() -> JsonSchema {
    JsonSchema::new()
        .with_property("id", SchemaProperty::string())
        .with_property("firstName", SchemaProperty::string())
        .with_property("lastName", SchemaProperty::string())
        .with_property("fullName", SchemaProperty::string())
        .with_property("email", SchemaProperty::email())
        .with_property("avatarUrl", SchemaProperty::uri())
        .with_property("organizationId", SchemaProperty::string())
        .with_property("isBlocked", SchemaProperty::boolean())
        .with_property("isDeleted", SchemaProperty::boolean())
        .with_property("timezone", SchemaProperty::string())
        .with_property("hasTwoFactorEnabled", SchemaProperty::boolean())
        .with_property("createdAt", SchemaProperty::date_time())
        .with_property("updatedAt", SchemaProperty::date_time())
        .with_property("subscriptionPlan", SchemaProperty::string())
        .with_property("ssoIsConnectedWithGoogle", SchemaProperty::boolean())
        .with_property("ssoIsConnectedWithApple", SchemaProperty::boolean())
        .with_property("hasPasswordSet", SchemaProperty::boolean())
        .with_property("authenticationMethodsCount", SchemaProperty::integer())
        .with_property("emailDomain", SchemaProperty::string())
}

/// Workspace member entry: a user without the organization-only flags
fn member_schema() -> SchemaProperty {
    SchemaProperty::object(properties([
        ("id", SchemaProperty::string()),
        ("firstName", SchemaProperty::string()),
        ("lastName", SchemaProperty::string()),
        ("fullName", SchemaProperty::string()),
        ("email", SchemaProperty::email()),
        ("avatarUrl", SchemaProperty::uri()),
        ("organizationId", SchemaProperty::string()),
        ("hasTwoFactorEnabled", SchemaProperty::boolean()),
        ("createdAt", SchemaProperty::date_time()),
        ("updatedAt", SchemaProperty::date_time()),
        ("subscriptionPlan", SchemaProperty::string()),
        ("ssoIsConnectedWithGoogle", SchemaProperty::boolean()),
        ("ssoIsConnectedWithApple", SchemaProperty::boolean()),
        ("hasPasswordSet", SchemaProperty::boolean()),
        ("authenticationMethodsCount", SchemaProperty::integer()),
        ("emailDomain", SchemaProperty::string()),
    ]))
}

fn properties<const N: usize>(
    entries: [(&str, SchemaProperty); N],
) -> BTreeMap<String, SchemaProperty> {
    entries
        .into_iter()
        .map(|(name, prop)| (name.to_string(), prop))
        .collect()
}

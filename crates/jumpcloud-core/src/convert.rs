// ── Model ⇄ domain conversions ──
//
// Resource models (tri-state, configuration-shaped) map onto the JumpCloud
// API entities and back. Both directions are total. Null and unknown values
// become zero values on the way out; everything coming back from the API is
// known. Lists are replaced wholesale and keep the order they arrive in.

use jumpcloud_api::types::{
    ActiveDirectory, ActiveDirectoryInput, FILTER_QUERY, LdapGroup, MemberQuery, PosixGroup,
    QueryFilter, RadiusConfig, RadiusReply, SudoConfig, SystemGroup, SystemGroupInput, UserGroup,
    UserGroupAttributes,
};

use crate::model::{
    ActiveDirectoryModel, DeviceGroupModel, LdapGroupModel, LdapModel, MemberQueryModel,
    PosixGroupModel, RadiusReplyModel, SambaModel, SudoModel, UserGroupModel,
};
use crate::value::Value;

// ── Helpers ────────────────────────────────────────────────────────

/// Decide whether a block read back from the API belongs in state.
///
/// A non-empty `current` always does. An empty one only replaces a prior
/// block that was itself empty, so `samba { enabled = false }` in
/// configuration does not flap against an API that omits the flag. A prior
/// block with content the API no longer reports is cleared.
fn reconcile<T>(prior: Option<&T>, current: T, is_empty: impl Fn(&T) -> bool) -> Option<T> {
    if !is_empty(&current) {
        return Some(current);
    }
    match prior {
        Some(prior) if is_empty(prior) => Some(current),
        _ => None,
    }
}

fn known_or_null<T>(value: Option<T>) -> Value<T> {
    value.map_or(Value::Null, Value::Known)
}

// ── User group: model → domain ─────────────────────────────────────

/// Build the API entity for a create or update request.
pub fn to_domain(model: &UserGroupModel) -> UserGroup {
    let sudo = model.sudo.as_ref().map(|sudo| SudoConfig {
        enabled: sudo.enabled.value_or_default(),
        without_password: sudo.passwordless.value_or_default(),
    });

    let ldap_groups: Vec<LdapGroup> = model
        .ldap
        .as_known()
        .and_then(|ldap| ldap.groups.as_known())
        .map(|groups| {
            groups
                .iter()
                .map(|g| LdapGroup {
                    name: g.name.value_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    let posix_groups: Vec<PosixGroup> = model
        .posix
        .iter()
        .flatten()
        .map(|g| PosixGroup {
            id: g.id.value_or_default(),
            name: g.name.value_or_default(),
        })
        .collect();

    let radius = model
        .radius
        .as_ref()
        .filter(|replies| !replies.is_empty())
        .map(|replies| RadiusConfig {
            reply: replies
                .iter()
                .map(|r| RadiusReply {
                    name: r.name.value_or_default(),
                    value: r.value.value_or_default(),
                })
                .collect(),
        });

    let samba_enabled = model
        .samba
        .as_ref()
        .is_some_and(|samba| samba.enabled.value_or_default());

    let attributes = (sudo.is_some()
        || !ldap_groups.is_empty()
        || !posix_groups.is_empty()
        || radius.is_some()
        || samba_enabled)
        .then(|| UserGroupAttributes {
            sudo,
            ldap_groups,
            posix_groups,
            radius,
            samba_enabled,
        });

    let filters: Vec<QueryFilter> = model
        .member_queries
        .iter()
        .flatten()
        .map(|q| QueryFilter {
            field: q.field.value_or_default(),
            operator: q.operator.value_or_default(),
            value: q.value.value_or_default(),
        })
        .collect();

    let member_query = (!filters.is_empty()).then(|| MemberQuery {
        query_type: FILTER_QUERY.to_owned(),
        filters,
    });

    UserGroup {
        id: model.id.value_or_default(),
        name: model.name.value_or_default(),
        description: model.description.value_or_default(),
        email: model.email.value_or_default(),
        attributes,
        member_query,
        member_suggestions_notify: model.notify.value_or_default(),
        membership_automated: model.auto.value_or_default(),
        ..UserGroup::default()
    }
}

// ── User group: domain → model ─────────────────────────────────────

/// Build the state written back after an API call.
///
/// `prior` is the plan or state the request was made from; it only decides
/// how blocks the API reports as empty are represented.
pub fn to_resource_model(group: &UserGroup, prior: &UserGroupModel) -> UserGroupModel {
    let attrs = group.attributes.clone().unwrap_or_default();

    let sudo = attrs.sudo.unwrap_or_default();
    let sudo = reconcile(
        prior.sudo.as_ref(),
        SudoModel {
            enabled: Value::known(sudo.enabled),
            passwordless: Value::known(sudo.without_password),
        },
        SudoModel::is_empty,
    );

    let ldap_groups: Vec<LdapGroupModel> = attrs
        .ldap_groups
        .iter()
        .map(|g| LdapGroupModel {
            name: Value::known(g.name.clone()),
        })
        .collect();
    let prior_ldap = prior.ldap.as_known();
    let groups = reconcile(
        prior_ldap.and_then(|ldap| ldap.groups.as_known()),
        ldap_groups,
        Vec::is_empty,
    );
    let ldap = reconcile(
        prior_ldap,
        LdapModel {
            groups: known_or_null(groups),
        },
        LdapModel::is_empty,
    );

    let posix: Vec<PosixGroupModel> = attrs
        .posix_groups
        .iter()
        .map(|g| PosixGroupModel {
            id: Value::known(g.id),
            name: Value::known(g.name.clone()),
        })
        .collect();

    let radius: Vec<RadiusReplyModel> = attrs
        .radius
        .iter()
        .flat_map(|r| &r.reply)
        .map(|r| RadiusReplyModel {
            name: Value::known(r.name.clone()),
            value: Value::known(r.value.clone()),
        })
        .collect();

    let samba = reconcile(
        prior.samba.as_ref(),
        SambaModel {
            enabled: Value::known(attrs.samba_enabled),
        },
        SambaModel::is_empty,
    );

    let member_queries: Vec<MemberQueryModel> = group
        .member_query
        .iter()
        .flat_map(|q| &q.filters)
        .map(|f| MemberQueryModel {
            field: Value::known(f.field.clone()),
            operator: Value::known(f.operator.clone()),
            value: Value::known(f.value.clone()),
        })
        .collect();

    UserGroupModel {
        id: Value::known(group.id.clone()),
        name: Value::known(group.name.clone()),
        sudo,
        ldap: known_or_null(ldap),
        posix: reconcile(prior.posix.as_ref(), posix, Vec::is_empty),
        radius: reconcile(prior.radius.as_ref(), radius, Vec::is_empty),
        samba,
        description: Value::known(group.description.clone()),
        email: Value::known(group.email.clone()),
        member_queries: reconcile(prior.member_queries.as_ref(), member_queries, Vec::is_empty),
        notify: Value::known(group.member_suggestions_notify),
        auto: Value::known(group.membership_automated),
    }
}

// ── Active Directory ───────────────────────────────────────────────

impl From<ActiveDirectory> for ActiveDirectoryModel {
    fn from(ad: ActiveDirectory) -> Self {
        Self {
            id: Value::known(ad.id),
            domain: Value::known(ad.domain),
        }
    }
}

impl From<&ActiveDirectoryModel> for ActiveDirectoryInput {
    fn from(model: &ActiveDirectoryModel) -> Self {
        Self {
            domain: model.domain.value_or_default(),
        }
    }
}

// ── Device group ───────────────────────────────────────────────────

impl From<SystemGroup> for DeviceGroupModel {
    fn from(group: SystemGroup) -> Self {
        Self {
            id: Value::known(group.id),
            name: Value::known(group.name),
        }
    }
}

impl From<&DeviceGroupModel> for SystemGroupInput {
    fn from(model: &DeviceGroupModel) -> Self {
        Self {
            name: model.name.value_or_default(),
        }
    }
}

//! Catalog of comparable Kubernetes resource kinds.
//!
//! Maps user-facing aliases (`deploy`, `svc`, `cm`, ...) to a canonical kind,
//! its `...List` tag and the criteria compared when the caller gives none.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::KompareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Namespace,
    Deployment,
    HorizontalPodAutoscaler,
    CronJob,
    CustomResourceDefinition,
    Ingress,
    Service,
    ConfigMap,
    Secret,
    ServiceAccount,
    Role,
    RoleBinding,
    ClusterRole,
    ClusterRoleBinding,
    NetworkPolicy,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 15] = [
        ResourceKind::Namespace,
        ResourceKind::Deployment,
        ResourceKind::HorizontalPodAutoscaler,
        ResourceKind::CronJob,
        ResourceKind::CustomResourceDefinition,
        ResourceKind::Ingress,
        ResourceKind::Service,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
        ResourceKind::ServiceAccount,
        ResourceKind::Role,
        ResourceKind::RoleBinding,
        ResourceKind::ClusterRole,
        ResourceKind::ClusterRoleBinding,
        ResourceKind::NetworkPolicy,
    ];

    /// Canonical lower-case name, as accepted on the command line.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "namespace",
            ResourceKind::Deployment => "deployment",
            ResourceKind::HorizontalPodAutoscaler => "hpa",
            ResourceKind::CronJob => "cronjob",
            ResourceKind::CustomResourceDefinition => "crd",
            ResourceKind::Ingress => "ingress",
            ResourceKind::Service => "service",
            ResourceKind::ConfigMap => "configmap",
            ResourceKind::Secret => "secret",
            ResourceKind::ServiceAccount => "sa",
            ResourceKind::Role => "role",
            ResourceKind::RoleBinding => "rolebinding",
            ResourceKind::ClusterRole => "clusterrole",
            ResourceKind::ClusterRoleBinding => "clusterrolebinding",
            ResourceKind::NetworkPolicy => "networkpolicy",
        }
    }

    /// Every accepted spelling, canonical name first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Namespace => &["namespace", "ns", "namespaces"],
            ResourceKind::Deployment => &["deployment", "deployments", "deploy"],
            ResourceKind::HorizontalPodAutoscaler => &[
                "hpa",
                "hpas",
                "horizontalpodautoscaler",
                "horizontalpodautoscalers",
            ],
            ResourceKind::CronJob => &["cronjob", "cronjobs", "cj"],
            ResourceKind::CustomResourceDefinition => &[
                "crd",
                "crds",
                "customresourcedefinition",
                "customresourcedefinitions",
            ],
            ResourceKind::Ingress => &["ingress", "ing", "ingresses"],
            ResourceKind::Service => &["service", "svc", "services"],
            ResourceKind::ConfigMap => &["configmap", "configmaps", "cm"],
            ResourceKind::Secret => &["secret", "secrets"],
            ResourceKind::ServiceAccount => &["sa", "serviceaccount", "serviceaccounts"],
            ResourceKind::Role => &["role", "roles"],
            ResourceKind::RoleBinding => &["rolebinding", "rolebindings"],
            ResourceKind::ClusterRole => &["clusterrole", "clusterroles"],
            ResourceKind::ClusterRoleBinding => &["clusterrolebinding", "clusterrolebindings"],
            ResourceKind::NetworkPolicy => &["networkpolicy", "networkpolicies", "netpol"],
        }
    }

    /// The Kubernetes `kind` of a list of this resource.
    pub fn list_kind(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "NamespaceList",
            ResourceKind::Deployment => "DeploymentList",
            ResourceKind::HorizontalPodAutoscaler => "HorizontalPodAutoscalerList",
            ResourceKind::CronJob => "CronJobList",
            ResourceKind::CustomResourceDefinition => "CustomResourceDefinitionList",
            ResourceKind::Ingress => "IngressList",
            ResourceKind::Service => "ServiceList",
            ResourceKind::ConfigMap => "ConfigMapList",
            ResourceKind::Secret => "SecretList",
            ResourceKind::ServiceAccount => "ServiceAccountList",
            ResourceKind::Role => "RoleList",
            ResourceKind::RoleBinding => "RoleBindingList",
            ResourceKind::ClusterRole => "ClusterRoleList",
            ResourceKind::ClusterRoleBinding => "ClusterRoleBindingList",
            ResourceKind::NetworkPolicy => "NetworkPolicyList",
        }
    }

    /// Criteria compared when the caller supplies none.
    pub fn default_criteria(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Namespace => &["Spec", "Name", "Status.Phase"],
            ResourceKind::Deployment => &["Spec.Template.Spec", "Name"],
            ResourceKind::HorizontalPodAutoscaler
            | ResourceKind::CronJob
            | ResourceKind::CustomResourceDefinition
            | ResourceKind::Service => &["Spec", "Name"],
            ResourceKind::Ingress | ResourceKind::NetworkPolicy => {
                &["Spec", "Name", "Annotations"]
            }
            ResourceKind::ConfigMap => &["Data", "Name", "Annotations"],
            ResourceKind::Secret | ResourceKind::ServiceAccount => &["Annotations", "Name"],
            ResourceKind::Role => &["Rules", "Name"],
            ResourceKind::RoleBinding => &["RoleRef", "Subjects"],
            ResourceKind::ClusterRole => &["Rules", "Name", "Annotations"],
            ResourceKind::ClusterRoleBinding => &["RoleRef", "Name", "Annotations"],
        }
    }

    /// Look up a kind by any of its aliases, case-insensitively.
    pub fn from_alias(alias: &str) -> Option<ResourceKind> {
        let wanted = alias.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&wanted.as_str()))
    }

    /// Look up a kind by its `...List` tag.
    pub fn from_list_kind(tag: &str) -> Option<ResourceKind> {
        Self::ALL.into_iter().find(|kind| kind.list_kind() == tag)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for ResourceKind {
    type Err = KompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::from_alias(s).ok_or_else(|| KompareError::UnknownResourceKind {
            alias: s.to_string(),
        })
    }
}

/// Split requested kinds into `(valid canonical names, invalid inputs)`.
pub fn validate_kinds<S: AsRef<str>>(requested: &[S]) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for item in requested {
        match ResourceKind::from_alias(item.as_ref()) {
            Some(kind) => valid.push(kind.canonical_name().to_string()),
            None => invalid.push(item.as_ref().to_string()),
        }
    }
    (valid, invalid)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_criteria(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn a kind tag into text for messages:
/// `HorizontalPodAutoscalerList` becomes `Horizontal Pod Autoscaler in the list`.
pub fn human_readable_kind(tag: &str) -> String {
    let mut spaced = String::with_capacity(tag.len() + 8);
    for (i, c) in tag.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    let base = spaced.strip_suffix(" List").unwrap_or(&spaced);
    format!("{base} in the list")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_kinds() {
        assert_eq!(ResourceKind::from_alias("deploy"), Some(ResourceKind::Deployment));
        assert_eq!(ResourceKind::from_alias("SVC"), Some(ResourceKind::Service));
        assert_eq!(ResourceKind::from_alias(" cm "), Some(ResourceKind::ConfigMap));
        assert_eq!(ResourceKind::from_alias("pods"), None);
    }

    #[test]
    fn test_every_kind_lists_its_canonical_name_first() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.aliases()[0], kind.canonical_name());
            assert_eq!(ResourceKind::from_list_kind(kind.list_kind()), Some(kind));
            assert!(!kind.default_criteria().is_empty());
        }
    }

    #[test]
    fn test_aliases_are_unambiguous() {
        let mut seen = std::collections::HashSet::new();
        for kind in ResourceKind::ALL {
            for alias in kind.aliases() {
                assert!(seen.insert(*alias), "alias {alias} is used twice");
            }
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("crd".parse::<ResourceKind>().unwrap(), ResourceKind::CustomResourceDefinition);
        assert_eq!(
            "widgets".parse::<ResourceKind>().unwrap_err(),
            KompareError::UnknownResourceKind {
                alias: "widgets".to_string()
            }
        );
    }

    #[test]
    fn test_validate_kinds_splits_valid_and_invalid() {
        let (valid, invalid) = validate_kinds(&["svc", "pods", "deployments"]);
        assert_eq!(valid, vec!["service", "deployment"]);
        assert_eq!(invalid, vec!["pods"]);
    }

    #[test]
    fn test_parse_criteria() {
        assert_eq!(parse_criteria("Spec, Name,,Annotations"), vec!["Spec", "Name", "Annotations"]);
        assert_eq!(parse_criteria("Spec,Spec"), vec!["Spec", "Spec"]);
        assert!(parse_criteria("").is_empty());
    }

    #[test]
    fn test_human_readable_kind() {
        assert_eq!(human_readable_kind("DeploymentList"), "Deployment in the list");
        assert_eq!(
            human_readable_kind("HorizontalPodAutoscalerList"),
            "Horizontal Pod Autoscaler in the list"
        );
        assert_eq!(human_readable_kind("unknown"), "unknown in the list");
    }
}

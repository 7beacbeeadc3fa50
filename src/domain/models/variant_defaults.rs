//! Release defaults for build configurations created from scratch.
//!
//! The first segment of a variant (`ocp` in `ocp-4.8`) selects the product,
//! release stream, and image namespace of the new configuration.

use std::collections::BTreeMap;

use super::build_config::{
    Candidate, ImageStreamTagReference, Metadata, ReleaseBuildConfiguration, ResourceRequirements,
    UnresolvedRelease,
};
use super::config::MigrationConfig;
use crate::domain::errors::{DomainResult, MigrationError};

/// Product a release candidate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseProduct {
    /// OpenShift Container Platform.
    Ocp,
    /// The community distribution.
    Okd,
}

impl ReleaseProduct {
    /// Serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ocp => "ocp",
            Self::Okd => "okd",
        }
    }
}

/// Stream a release candidate is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStream {
    /// CI builds.
    Ci,
    /// Nightly builds.
    Nightly,
    /// OKD builds.
    Okd,
}

impl ReleaseStream {
    /// Serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ci => "ci",
            Self::Nightly => "nightly",
            Self::Okd => "okd",
        }
    }
}

/// Defaults implied by a variant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDefaults {
    /// Candidate product.
    pub product: ReleaseProduct,
    /// Candidate stream.
    pub stream: ReleaseStream,
    /// Namespace of the `base` image.
    pub namespace: &'static str,
}

const VARIANT_DEFAULTS: &[(&str, VariantDefaults)] = &[
    (
        "ocp",
        VariantDefaults {
            product: ReleaseProduct::Ocp,
            stream: ReleaseStream::Nightly,
            namespace: "ocp",
        },
    ),
    (
        "origin",
        VariantDefaults {
            product: ReleaseProduct::Ocp,
            stream: ReleaseStream::Ci,
            namespace: "ocp",
        },
    ),
    (
        "okd",
        VariantDefaults {
            product: ReleaseProduct::Okd,
            stream: ReleaseStream::Okd,
            namespace: "origin",
        },
    ),
];

impl VariantDefaults {
    /// Defaults for a known identifier: `ocp`, `origin` or `okd`.
    pub fn lookup(identifier: &str) -> Option<Self> {
        VARIANT_DEFAULTS
            .iter()
            .find(|(known, _)| *known == identifier)
            .map(|(_, defaults)| *defaults)
    }
}

/// Build a minimal configuration for a basename such as
/// `openshift-release-master__ocp-4.8.yaml`.
pub fn default_build_config(
    basename: &str,
    settings: &MigrationConfig,
) -> DomainResult<ReleaseBuildConfiguration> {
    let variant = basename
        .strip_suffix(".yaml")
        .unwrap_or(basename)
        .split_once("__")
        .map(|(_, variant)| variant)
        .filter(|variant| !variant.is_empty())
        .ok_or_else(|| MigrationError::InvalidBasename(basename.to_string()))?;

    let mut parts = variant.split('-');
    let (identifier, version) = match (parts.next(), parts.next()) {
        (Some(identifier), Some(version)) if !version.is_empty() => (identifier, version),
        _ => return Err(MigrationError::InvalidBasename(basename.to_string())),
    };
    let defaults = VariantDefaults::lookup(identifier).ok_or_else(|| {
        MigrationError::UnknownVariantIdentifier {
            basename: basename.to_string(),
            identifier: identifier.to_string(),
        }
    })?;

    let base_images = BTreeMap::from([(
        "base".to_string(),
        ImageStreamTagReference {
            namespace: defaults.namespace.to_string(),
            name: version.to_string(),
            tag: "base".to_string(),
            alias: String::new(),
        },
    )]);
    let releases = BTreeMap::from([(
        "latest".to_string(),
        UnresolvedRelease {
            candidate: Some(Candidate {
                product: defaults.product.as_str().to_string(),
                stream: defaults.stream.as_str().to_string(),
                version: version.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        },
    )]);
    let resources = BTreeMap::from([(
        "*".to_string(),
        ResourceRequirements {
            requests: BTreeMap::from([
                ("cpu".to_string(), "100m".to_string()),
                ("memory".to_string(), "200Mi".to_string()),
            ]),
            limits: BTreeMap::new(),
        },
    )]);

    Ok(ReleaseBuildConfiguration {
        base_images,
        releases,
        resources,
        tests: Vec::new(),
        zz_generated_metadata: Some(Metadata {
            org: settings.org.clone(),
            repo: settings.repo.clone(),
            branch: settings.branch.clone(),
            variant: variant.to_string(),
        }),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        let origin = VariantDefaults::lookup("origin").unwrap();
        assert_eq!(origin.product, ReleaseProduct::Ocp);
        assert_eq!(origin.stream, ReleaseStream::Ci);
        assert_eq!(origin.namespace, "ocp");

        let okd = VariantDefaults::lookup("okd").unwrap();
        assert_eq!(okd.namespace, "origin");
        assert!(VariantDefaults::lookup("knative").is_none());
    }

    #[test]
    fn test_default_config_for_ocp() {
        let settings = MigrationConfig::default();
        let config =
            default_build_config("openshift-release-master__ocp-4.8.yaml", &settings).unwrap();
        let base = &config.base_images["base"];
        assert_eq!(base.namespace, "ocp");
        assert_eq!(base.name, "4.8");
        assert_eq!(base.tag, "base");

        let candidate = config.releases["latest"].candidate.as_ref().unwrap();
        assert_eq!(candidate.product, "ocp");
        assert_eq!(candidate.stream, "nightly");
        assert_eq!(candidate.version, "4.8");

        assert_eq!(config.resources["*"].requests["cpu"], "100m");
        assert_eq!(config.resources["*"].requests["memory"], "200Mi");
        assert_eq!(config.zz_generated_metadata.unwrap().variant, "ocp-4.8");
        assert!(config.tests.is_empty());
    }

    #[test]
    fn test_default_config_for_okd() {
        let settings = MigrationConfig::default();
        let config =
            default_build_config("openshift-release-master__okd-4.7.yaml", &settings).unwrap();
        assert_eq!(config.base_images["base"].namespace, "origin");
        assert_eq!(config.releases["latest"].candidate.as_ref().unwrap().stream, "okd");
    }

    #[test]
    fn test_rejects_unknown_identifier() {
        let err = default_build_config(
            "openshift-release-master__knative-4.8.yaml",
            &MigrationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::UnknownVariantIdentifier { identifier, .. } if identifier == "knative"
        ));
    }

    #[test]
    fn test_rejects_basename_without_variant() {
        let settings = MigrationConfig::default();
        assert!(matches!(
            default_build_config("openshift-release-master.yaml", &settings),
            Err(MigrationError::InvalidBasename(_))
        ));
        assert!(matches!(
            default_build_config("openshift-release-master__ocp.yaml", &settings),
            Err(MigrationError::InvalidBasename(_))
        ));
    }
}

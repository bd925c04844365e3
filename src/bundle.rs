//! Bundle / resource configuration source.
//!
//! The resource container hands the enrollee an already-parsed tree of
//! bundle definitions; nothing here reads files or parses XML.  Each
//! bundle is a flat property map (`id`, `path`, `version`, ...) plus a
//! list of resource definitions whose nested property groups map a group
//! name to a list of property maps:
//!
//! ```text
//! bundles[]
//!   ├── id / path / version / ...        (flat strings)
//!   └── resources[]
//!         ├── name / uri / address / resourceType
//!         └── properties: group -> [ {key: value, ...}, ... ]
//! ```
//!
//! Every string handed out by the accessors is trimmed of ASCII
//! whitespace (`" \t\v\n\r"`); the stored tree is left untouched.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::ConfigError;

/// Flat string → string property map.
pub type PropertyMap = BTreeMap<String, String>;

/// One resource definition inside a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceInfo {
    pub name: String,
    pub uri: String,
    pub address: String,
    pub resource_type: String,
    /// Nested property groups, e.g. `"output" -> [{"key": "temp"}]`.
    pub properties: BTreeMap<String, Vec<PropertyMap>>,
}

/// One bundle: its flat properties and its resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BundleConfig {
    #[serde(default)]
    pub resources: Vec<ResourceInfo>,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

#[derive(Deserialize)]
struct Document {
    bundles: Vec<BundleConfig>,
}

/// Ordered collection of bundle definitions.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationSource {
    bundles: Vec<BundleConfig>,
    loaded: bool,
}

fn trim_both(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\x0b' | '\n' | '\r'))
}

impl ConfigurationSource {
    /// A source that was never populated; [`is_loaded`](Self::is_loaded) is false.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_bundles(bundles: Vec<BundleConfig>) -> Self {
        Self {
            bundles,
            loaded: true,
        }
    }

    /// Accept the JSON rendering of the parsed bundle tree:
    /// `{"bundles": [{"id": "..", "resources": [..]}, ..]}`.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        let doc: Document = serde_json::from_str(doc).map_err(|_| ConfigError::Malformed)?;
        Ok(Self::from_bundles(doc.bundles))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Flat properties of every bundle, in declaration order.
    /// Properties with an empty value are dropped.
    pub fn configured_bundles(&self) -> Vec<PropertyMap> {
        self.bundles
            .iter()
            .map(|b| {
                b.properties
                    .iter()
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(k, v)| (trim_both(k).to_owned(), trim_both(v).to_owned()))
                    .collect()
            })
            .collect()
    }

    /// `id`, `path` and `version` of the first bundle whose id matches.
    pub fn bundle_configuration(&self, bundle_id: &str) -> Option<PropertyMap> {
        let bundle = self.find(bundle_id)?;
        let mut out = PropertyMap::new();
        for key in ["id", "path", "version"] {
            if let Some(v) = bundle.properties.get(key) {
                out.insert(key.to_owned(), trim_both(v).to_owned());
            }
        }
        Some(out)
    }

    /// Resources of every bundle whose id matches, in declaration order;
    /// empty when the id is unknown.
    pub fn resource_configuration(&self, bundle_id: &str) -> Vec<ResourceInfo> {
        self.matching(bundle_id)
            .flat_map(|b| b.resources.iter().map(trimmed_resource))
            .collect()
    }

    fn find<'a>(&'a self, bundle_id: &'a str) -> Option<&'a BundleConfig> {
        self.matching(bundle_id).next()
    }

    fn matching<'a>(&'a self, bundle_id: &'a str) -> impl Iterator<Item = &'a BundleConfig> + 'a {
        self.bundles
            .iter()
            .filter(move |b| b.properties.get("id").is_some_and(|id| id == bundle_id))
    }
}

fn trimmed_resource(r: &ResourceInfo) -> ResourceInfo {
    let trim_map = |m: &PropertyMap| -> PropertyMap {
        m.iter()
            .map(|(k, v)| (trim_both(k).to_owned(), trim_both(v).to_owned()))
            .collect()
    };

    ResourceInfo {
        name: trim_both(&r.name).to_owned(),
        uri: trim_both(&r.uri).to_owned(),
        address: trim_both(&r.address).to_owned(),
        resource_type: trim_both(&r.resource_type).to_owned(),
        properties: r
            .properties
            .iter()
            .map(|(group, maps)| (trim_both(group).to_owned(), maps.iter().map(trim_map).collect()))
            .collect(),
    }
}

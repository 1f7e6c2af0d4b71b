//! Resource inventory input: the list discovery hands to `check`.

use anyhow::Context;
use camino::Utf8Path;
use tagguard_domain::model::InventoryResource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryFormat {
    Json,
    Yaml,
}

impl InventoryFormat {
    /// `.yaml`/`.yml` is YAML; anything else is read as JSON.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("yaml") | Some("yml") => InventoryFormat::Yaml,
            _ => InventoryFormat::Json,
        }
    }
}

pub fn parse_inventory(
    text: &str,
    format: InventoryFormat,
) -> anyhow::Result<Vec<InventoryResource>> {
    let resources: Vec<InventoryResource> = match format {
        InventoryFormat::Json => serde_json::from_str(text).context("parse inventory json")?,
        InventoryFormat::Yaml => serde_yaml::from_str(text).context("parse inventory yaml")?,
    };

    for (index, r) in resources.iter().enumerate() {
        if r.id.is_empty() {
            anyhow::bail!("inventory[{index}]: resource id must not be empty");
        }
        if r.resource_type.is_empty() {
            anyhow::bail!("inventory[{index}] ({}): resource_type must not be empty", r.id);
        }
    }

    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_inventory() {
        let resources = parse_inventory(
            r#"[
                {"id": "i-1", "resource_type": "ec2", "region": "us-east-1", "tags": {"Owner": "ops"}},
                {"id": "bucket", "resource_type": "s3"}
            ]"#,
            InventoryFormat::Json,
        )
        .expect("parse");

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].region.as_deref(), Some("us-east-1"));
        assert_eq!(resources[0].tags["Owner"], "ops");
        assert!(resources[1].tags.is_empty());
    }

    #[test]
    fn parses_yaml_inventory() {
        let resources = parse_inventory(
            "- id: i-1\n  resource_type: ec2\n  tags:\n    Environment: prod\n",
            InventoryFormat::Yaml,
        )
        .expect("parse");
        assert_eq!(resources[0].tags["Environment"], "prod");
    }

    #[test]
    fn rejects_resource_without_id() {
        let err = parse_inventory(r#"[{"id": "", "resource_type": "ec2"}]"#, InventoryFormat::Json)
            .expect_err("must fail");
        assert!(err.to_string().contains("inventory[0]"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_inventory("{not json", InventoryFormat::Json).expect_err("must fail");
        assert!(format!("{err:#}").contains("parse inventory json"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            InventoryFormat::from_path(Utf8Path::new("inv.yml")),
            InventoryFormat::Yaml
        );
        assert_eq!(
            InventoryFormat::from_path(Utf8Path::new("inv.yaml")),
            InventoryFormat::Yaml
        );
        assert_eq!(
            InventoryFormat::from_path(Utf8Path::new("inv.json")),
            InventoryFormat::Json
        );
    }
}

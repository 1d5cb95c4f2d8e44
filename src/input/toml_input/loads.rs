use indexmap::IndexMap;
use serde::Deserialize;

use crate::input::Load;

#[derive(Deserialize)]
struct LoadTables {
    #[serde(default)]
    load: IndexMap<String, Load>,
}

/// The content of a loads file, one `[load."<id>"]` table per load.
///
/// The key of a table is the id of its load.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "LoadTables")]
pub struct Loads {
    loads: Vec<Load>,
}

impl From<LoadTables> for Loads {
    fn from(tables: LoadTables) -> Self {
        Self {
            loads: tables
                .load
                .into_iter()
                .map(|(id, load)| load.with_id(id))
                .collect(),
        }
    }
}

impl Loads {
    /// The loads in the order they appear in the file.
    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    pub fn into_loads(self) -> Vec<Load> {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::input::LoadKind;

    #[test]
    fn test_parse_loads() {
        let loads: Loads = toml::from_str(concat!(
            //
            "[load.\"P-100\"]\n",
            "name = \"Warehouse steel\"\n",
            "hours = 120\n",
            "start = \"2024-03-04\"\n",
            "end = \"2024-03-29\"\n",
            "\n",
            "[load.\"P-100\".overrides]\n",
            "\"2024-03-08\" = 4\n",
            "\n",
            "[load.\"B-7\"]\n",
            "name = \"Handrails\"\n",
            "kind = \"backlog\"\n",
            "hours = 12.5\n",
            "start = \"2024-03-11\"\n",
        ))
        .expect("toml should be valid");

        assert_eq!(
            loads.loads(),
            &[
                Load::new("P-100", "Warehouse steel", 120.0, "2024-03-04")
                    .with_end("2024-03-29")
                    .with_override("2024-03-08", 4.0),
                Load::new("B-7", "Handrails", 12.5, "2024-03-11").with_kind(LoadKind::Backlog),
            ]
        );
    }

    #[test]
    fn test_malformed_dates_are_kept_for_the_scheduler() {
        let loads: Loads = toml::from_str(concat!(
            //
            "[load.broken]\n",
            "name = \"Broken\"\n",
            "hours = 1\n",
            "start = \"next week\"\n",
        ))
        .expect("toml should be valid");

        assert_eq!(loads.loads()[0].start(), "next week");
    }

    #[test]
    fn test_table_key_is_the_id() {
        let loads: Loads = toml::from_str(concat!(
            //
            "[load.\"P-2\"]\n",
            "id = \"ignored\"\n",
            "name = \"Railing\"\n",
            "hours = 4\n",
            "start = \"2024-03-04\"\n",
            "\n",
            "[load.\"P-1\"]\n",
            "name = \"Stairs\"\n",
            "hours = 8\n",
            "start = \"2024-03-04\"\n",
        ))
        .expect("toml should be valid");

        assert_eq!(
            loads.loads().iter().map(Load::id).collect::<Vec<_>>(),
            vec!["P-2", "P-1"]
        );
        assert_eq!(
            toml::from_str::<Loads>("")
                .expect("toml should be valid")
                .into_loads(),
            vec![]
        );
    }
}

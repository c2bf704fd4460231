use prometheus::core::Collector;
use std::collections::BTreeMap;

/// Documentation for one metric family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub name: String,
    pub help: String,
    pub labels: Vec<String>,
}

/// Metric documentation keyed (and therefore sorted) by metric name
#[derive(Debug, Clone, Default)]
pub struct Descriptions(BTreeMap<String, Description>);

impl Descriptions {
    /// Collects the descriptors of every collector
    pub fn from_collectors(collectors: &[&dyn Collector]) -> Self {
        let mut descriptions = BTreeMap::new();
        for collector in collectors {
            for desc in collector.desc() {
                descriptions.insert(
                    desc.fq_name.clone(),
                    Description {
                        name: desc.fq_name.clone(),
                        help: desc.help.clone(),
                        labels: desc.variable_labels.clone(),
                    },
                );
            }
        }
        Self(descriptions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Description> {
        self.0.get(name)
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("| Metric | Description | Labels |\n");
        out.push_str("| ------ | ----------- | ------ |\n");
        for d in self.0.values() {
            out.push_str(&format!(
                "| `{}` | {} | ` {} ` |\n",
                d.name,
                d.help,
                d.labels.join(", ")
            ));
        }
        out
    }

    /// Same table in Jira wiki markup
    pub fn to_jira_markup(&self) -> String {
        let mut out = String::from("||Metric||Description||Labels||\n");
        for d in self.0.values() {
            out.push_str(&format!(
                "|{}|{}|{{{{ {} }}}}|\n",
                d.name,
                d.help,
                d.labels.join(", ")
            ));
        }
        out
    }
}

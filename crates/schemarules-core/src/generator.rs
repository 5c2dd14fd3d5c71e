//! Table-level rule generation: fetch, filter, classify.

use crate::classifier::Classifier;
use crate::config::RulesConfig;
use crate::error::RulesError;
use crate::provider::ColumnMetadataProvider;
use crate::types::{ColumnDescriptor, TableRules};
#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// Produces the rule mapping for one table using a backend's provider and
/// classifier.
pub struct TableRuleGenerator<'a> {
    provider: Box<dyn ColumnMetadataProvider + 'a>,
    classifier: Classifier,
    config: &'a RulesConfig,
}

impl<'a> TableRuleGenerator<'a> {
    pub fn new(
        provider: Box<dyn ColumnMetadataProvider + 'a>,
        classifier: Classifier,
        config: &'a RulesConfig,
    ) -> Self {
        Self {
            provider,
            classifier,
            config,
        }
    }

    pub fn config(&self) -> &RulesConfig {
        self.config
    }

    /// Raw column metadata for `table`, before any filtering.
    pub fn describe(&self, table: &str) -> Result<Vec<ColumnDescriptor>, RulesError> {
        Ok(self.provider.fetch_columns(table)?)
    }

    /// Generates rules for `table`.
    ///
    /// A non-empty `columns` list restricts the output to those names. Skip
    /// listed and auto-increment columns are always dropped. The result keeps
    /// catalog order and is empty, not an error, when everything is filtered.
    pub fn generate(&self, table: &str, columns: &[String]) -> Result<TableRules, RulesError> {
        #[cfg(feature = "tracing")]
        let _span = info_span!("generate_rules", table, requested = columns.len()).entered();

        let descriptors = self.describe(table)?;
        let rules = build_table_rules(&descriptors, columns, self.classifier, self.config);

        #[cfg(feature = "tracing")]
        debug!(
            fetched = descriptors.len(),
            generated = rules.len(),
            "generated table rules"
        );

        Ok(rules)
    }
}

/// Applies the column filters and classifies what remains, without I/O.
///
/// Filters run in order: the explicit column list (when non-empty), the skip
/// list, then auto-increment.
pub fn build_table_rules(
    descriptors: &[ColumnDescriptor],
    columns: &[String],
    classifier: Classifier,
    config: &RulesConfig,
) -> TableRules {
    let mut rules = TableRules::new();

    for column in descriptors {
        if !columns.is_empty() && !columns.iter().any(|name| *name == column.name) {
            continue;
        }
        if config.is_skipped(&column.name) {
            #[cfg(feature = "tracing")]
            debug!(column = %column.name, "skipping listed column");
            continue;
        }
        if column.is_auto_increment {
            #[cfg(feature = "tracing")]
            debug!(column = %column.name, "skipping auto-increment column");
            continue;
        }

        rules.insert(column.name.clone(), classifier(column, config));
    }

    rules
}

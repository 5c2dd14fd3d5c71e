//! Form-request class scaffolding.
//!
//! Writes `app/Http/Requests/<Name>.php` from a form-request stub and splices
//! the generated rules into its `rules()` method.

use crate::error::CliError;
use crate::output::format_php;
use anyhow::{Context, Result};
use inflector::Inflector;
use regex::Regex;
use schemarules_core::TableRules;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Directory, relative to the project root, that holds request classes.
pub const REQUESTS_DIR: &str = "app/Http/Requests";

const STUB: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Foundation\Http\FormRequest;

class {{ class }} extends FormRequest
{
    /**
     * Determine if the user is authorized to make this request.
     */
    public function authorize(): bool
    {
        return false;
    }

    /**
     * Get the validation rules that apply to the request.
     *
     * @return array<string, \Illuminate\Contracts\Validation\ValidationRule|array<mixed>|string>
     */
    public function rules(): array
    {
        return [
            //
        ];
    }
}
"#;

/// Default request class for a table: `Store` + singular studly name + `Request`.
pub fn default_class_name(table: &str) -> String {
    format!("Store{}Request", table.to_singular().to_pascal_case())
}

/// Where a request class is written and how it is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub path: PathBuf,
    pub namespace: String,
    pub class: String,
}

/// Resolves a `--file` value (`Admin/UpdateUserRequest`, `UpdateUserRequest.php`)
/// into its location under [`REQUESTS_DIR`].
pub fn request_target(base: &Path, name: &str) -> Result<RequestTarget> {
    let trimmed = name.trim().trim_end_matches(".php");
    let mut segments: Vec<&str> = trimmed
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();

    let class = segments
        .pop()
        .with_context(|| format!("Invalid request class name '{name}'"))?
        .to_string();

    let mut path = base.join(REQUESTS_DIR);
    path.extend(&segments);
    path.push(format!("{class}.php"));

    let namespace = std::iter::once("App\\Http\\Requests")
        .chain(segments.iter().copied())
        .collect::<Vec<_>>()
        .join("\\");

    Ok(RequestTarget {
        path,
        namespace,
        class,
    })
}

/// Replaces the array returned by `rules()` with the rendered rules.
///
/// Returns `None` when the source has no `rules(): array` method to splice into.
pub fn splice_rules(source: &str, rules: &TableRules) -> Option<String> {
    static RULES_METHOD: OnceLock<Regex> = OnceLock::new();
    let re = RULES_METHOD.get_or_init(|| {
        Regex::new(r"(?s)(public function rules\(\): array\s*\{\s*return )\[.*\](;)")
            .expect("Invalid regex pattern")
    });

    if !re.is_match(source) {
        return None;
    }

    let rendered = format_php(rules).replace('\n', "\n        ");
    let spliced = re.replace(source, |caps: &regex::Captures<'_>| {
        format!("{}{rendered}{}", &caps[1], &caps[2])
    });
    Some(spliced.into_owned())
}

/// Writes the request class for `table` and returns its path.
///
/// An existing file is only replaced when `force` is set.
pub fn create_request(
    base: &Path,
    table: &str,
    file: Option<&str>,
    rules: &TableRules,
    force: bool,
) -> Result<PathBuf> {
    let name = file
        .map(str::to_string)
        .unwrap_or_else(|| default_class_name(table));
    let RequestTarget {
        path,
        namespace,
        class,
    } = request_target(base, &name)?;

    if path.exists() && !force {
        return Err(CliError::RequestExists(path).into());
    }

    let scaffold = STUB
        .replace("{{ namespace }}", &namespace)
        .replace("{{ class }}", &class);
    let content = splice_rules(&scaffold, rules)
        .with_context(|| format!("Failed to add rules to {}", path.display()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, content)
        .with_context(|| format!("Failed to write request class {}", path.display()))?;

    Ok(path)
}

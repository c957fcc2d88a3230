//! Live resources described through the `gcloud` command line.

use std::process::Command;
use tracing::{debug, info};

use super::{expect_object, DocumentSource, SourceError};
use crate::value::{self, Map};

/// Program invoked by default.
pub const GCLOUD: &str = "gcloud";

/// Shortcut names for common resource types and the command groups they
/// stand for.
pub const RESOURCE_TYPES: &[(&str, &str)] = &[
    ("compute", "compute instances"),
    ("storage", "storage buckets"),
    ("firewall", "compute firewall-rules"),
    ("network", "compute networks"),
    ("subnet", "compute networks subnets"),
    ("disk", "compute disks"),
    ("run", "run services"),
    ("sql", "sql instances"),
    ("pubsub-topic", "pubsub topics"),
    ("pubsub-subscription", "pubsub subscriptions"),
    ("iam-service-account", "iam service-accounts"),
];

/// ResourceType is the command group whose `describe` verb fetches a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    group: Vec<String>,
}

impl ResourceType {
    /// Resolves a shortcut, or takes `name` as a raw command group such as
    /// `"container clusters"`.
    pub fn resolve(name: &str) -> Self {
        let group = RESOURCE_TYPES
            .iter()
            .find(|(shortcut, _)| *shortcut == name)
            .map_or(name, |(_, group)| *group);

        ResourceType {
            group: group.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Uses the given arguments verbatim as the command group.
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ResourceType {
            group: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `name` is one of the built-in shortcuts.
    pub fn is_builtin(name: &str) -> bool {
        RESOURCE_TYPES.iter().any(|(shortcut, _)| *shortcut == name)
    }

    pub fn group(&self) -> &[String] {
        &self.group
    }
}

/// Location holds the optional placement flags of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub zone: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
}

impl Location {
    /// Fills each unset flag from `fallback`.
    pub fn or(&self, fallback: &Location) -> Location {
        Location {
            zone: self.zone.clone().or_else(|| fallback.zone.clone()),
            region: self.region.clone().or_else(|| fallback.region.clone()),
            location: self.location.clone().or_else(|| fallback.location.clone()),
        }
    }

    fn flags(&self) -> impl Iterator<Item = String> + '_ {
        [
            ("zone", &self.zone),
            ("region", &self.region),
            ("location", &self.location),
        ]
        .into_iter()
        .filter_map(|(flag, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some(format!("--{}={}", flag, v)),
            _ => None,
        })
    }
}

/// GcloudSource describes resources of one type in one project.
#[derive(Debug, Clone)]
pub struct GcloudSource {
    program: String,
    resource: ResourceType,
    project: String,
    location: Location,
}

impl GcloudSource {
    pub fn new(resource: ResourceType, project: impl Into<String>, location: Location) -> Self {
        GcloudSource {
            program: GCLOUD.to_string(),
            resource,
            project: project.into(),
            location,
        }
    }

    /// Runs `program` instead of `gcloud`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn has_format_flag(&self) -> bool {
        self.resource.group.iter().any(|arg| arg.starts_with("--format="))
    }

    /// The arguments passed to the program to describe `name`.
    pub fn args(&self, name: &str) -> Vec<String> {
        let mut args = self.resource.group.clone();
        args.push("describe".to_string());
        args.push(name.to_string());
        if !self.project.is_empty() {
            args.push(format!("--project={}", self.project));
        }
        args.extend(self.location.flags());
        if !self.has_format_flag() {
            args.push("--format=json".to_string());
        }
        args
    }
}

impl DocumentSource for GcloudSource {
    fn fetch(&self, name: &str) -> Result<Map, SourceError> {
        let args = self.args(name);
        let command = format!("{} {}", self.program, args.join(" "));
        info!(resource = name, project = %self.project, "fetching resource");
        debug!(%command, "running");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| SourceError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SourceError::Command {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        // A caller-supplied --format may be anything YAML can read.
        let parsed = if self.has_format_flag() {
            value::from_yaml(&stdout).map_err(|e| e.to_string())
        } else {
            value::from_json(&stdout).map_err(|e| e.to_string())
        };
        let value = parsed.map_err(|message| SourceError::Parse {
            origin: format!("output of `{}`", command),
            message,
        })?;

        expect_object(value, name)
    }
}

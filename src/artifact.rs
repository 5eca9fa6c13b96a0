//! Registration artifacts.
//!
//! An artifact is the finished, serialized description of one script
//! type's signals: a JSON array of [`MethodDescriptor`]s named
//! `<Type>.<extension>`. What happens to it afterwards (written to disk,
//! embedded, sent to an editor) is up to the [`EmissionSink`].

use serde::Serialize;

use sigbridge_core::MethodDescriptor;

use crate::error::ArtifactError;

/// One rendered registration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Script type the table belongs to.
    pub type_name: String,
    /// `<Type>.<extension>`.
    pub file_name: String,
    /// Serialized contents.
    pub contents: String,
}

#[derive(Serialize)]
struct ArtifactBody<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    signals: &'a [MethodDescriptor],
}

impl Artifact {
    /// Render a type's method descriptors.
    pub fn render(
        type_name: &str,
        extension: &str,
        methods: &[MethodDescriptor],
        pretty: bool,
    ) -> Result<Self, ArtifactError> {
        let body = ArtifactBody {
            type_name,
            signals: methods,
        };
        let contents = if pretty {
            serde_json::to_string_pretty(&body)
        } else {
            serde_json::to_string(&body)
        }
        .map_err(|source| ArtifactError::Serialize {
            type_name: type_name.to_string(),
            source,
        })?;

        Ok(Self {
            type_name: type_name.to_string(),
            file_name: format!("{}.{}", type_name, extension),
            contents,
        })
    }
}

/// Accepts finished artifacts.
pub trait EmissionSink {
    fn accept(&mut self, artifact: Artifact);
}

impl EmissionSink for Vec<Artifact> {
    fn accept(&mut self, artifact: Artifact) {
        self.push(artifact);
    }
}

impl<F> EmissionSink for F
where
    F: FnMut(Artifact),
{
    fn accept(&mut self, artifact: Artifact) {
        (self)(artifact)
    }
}

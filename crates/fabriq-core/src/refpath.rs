// Reference-string grammars.
//
// Schema documents cross-link objects with slash-delimited reference
// strings. The obvious temptation is to split on '/' and index -- that
// silently corrupts fields the moment a segment count varies. Both
// grammars here validate labels and segment counts and fail with a
// structured error instead.

use crate::error::CoreError;

/// A parsed object reference:
/// `[/]schemas/{schema}/templates/{template}/{collection}/{name}`.
///
/// Both the leading-slash and bare forms occur on the wire (bd and vrf
/// references on the same document disagree); they parse identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub schema_id: String,
    pub template: String,
    pub name: String,
}

/// Parse an object reference, requiring the final collection label to
/// be `collection` (`"bds"`, `"vrfs"`, `"epgs"`).
pub fn parse_object_ref(raw: &str, collection: &str) -> Result<ObjectRef, CoreError> {
    let malformed = |reason: String| CoreError::MalformedReference {
        reference: raw.to_owned(),
        reason,
    };

    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.len() != 6 {
        return Err(malformed(format!(
            "expected 6 segments, found {}",
            segments.len()
        )));
    }

    for (index, label) in [(0, "schemas"), (2, "templates"), (4, collection)] {
        if segments[index] != label {
            return Err(malformed(format!(
                "expected label '{label}' at segment {index}, found '{}'",
                segments[index]
            )));
        }
    }
    for index in [1, 3, 5] {
        if segments[index].is_empty() {
            return Err(malformed(format!("empty value at segment {index}")));
        }
    }

    Ok(ObjectRef {
        schema_id: segments[1].to_owned(),
        template: segments[3].to_owned(),
        name: segments[5].to_owned(),
    })
}

/// A parsed endpoint-group reference:
/// `[/]schemas/{schema}/templates/{template}/anps/{anp}/epgs/{name}`.
///
/// Site-local overrides point back at their template-level epg with
/// this longer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpgRef {
    pub schema_id: String,
    pub template: String,
    pub anp: String,
    pub name: String,
}

pub fn parse_epg_ref(raw: &str) -> Result<EpgRef, CoreError> {
    let malformed = |reason: String| CoreError::MalformedReference {
        reference: raw.to_owned(),
        reason,
    };

    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.len() != 8 {
        return Err(malformed(format!(
            "expected 8 segments, found {}",
            segments.len()
        )));
    }

    for (index, label) in [(0, "schemas"), (2, "templates"), (4, "anps"), (6, "epgs")] {
        if segments[index] != label {
            return Err(malformed(format!(
                "expected label '{label}' at segment {index}, found '{}'",
                segments[index]
            )));
        }
    }
    for index in [1, 3, 5, 7] {
        if segments[index].is_empty() {
            return Err(malformed(format!("empty value at segment {index}")));
        }
    }

    Ok(EpgRef {
        schema_id: segments[1].to_owned(),
        template: segments[3].to_owned(),
        anp: segments[5].to_owned(),
        name: segments[7].to_owned(),
    })
}

/// A parsed static-port path:
/// `topology/{pod}/(paths-|protpaths-){leaf}/pathep-[{interface}]`.
///
/// The interface may itself contain slashes (`eth1/33`), so the final
/// component is matched by its bracket delimiters rather than split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortPath {
    pub pod: String,
    pub leaf: String,
    pub interface: String,
}

pub fn parse_port_path(raw: &str) -> Result<PortPath, CoreError> {
    let malformed = |reason: &str| CoreError::MalformedReference {
        reference: raw.to_owned(),
        reason: reason.to_owned(),
    };

    let mut parts = raw.splitn(4, '/');
    match parts.next() {
        Some("topology") => {}
        _ => return Err(malformed("expected leading 'topology' segment")),
    }

    let pod = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("missing pod segment"))?;

    let leaf_segment = parts.next().ok_or_else(|| malformed("missing leaf segment"))?;
    let leaf = leaf_segment
        .strip_prefix("protpaths-")
        .or_else(|| leaf_segment.strip_prefix("paths-"))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("leaf segment lacks a 'paths-'/'protpaths-' prefix"))?;

    let endpoint = parts.next().ok_or_else(|| malformed("missing path endpoint"))?;
    let interface = endpoint
        .strip_prefix("pathep-[")
        .and_then(|s| s.strip_suffix(']'))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("path endpoint is not of the form 'pathep-[..]'"))?;

    Ok(PortPath {
        pod: pod.to_owned(),
        leaf: leaf.to_owned(),
        interface: interface.to_owned(),
    })
}

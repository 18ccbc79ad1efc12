// Generic nested-collection traversal.
//
// Every listing is the same walk over a different chain of collection
// names, so a single recursive descent serves all of them.

use fabriq_api::Document;

use crate::error::CoreError;

/// Walk the named nested collections of `doc`, invoking `visit` at
/// each leaf with the stack of ancestor nodes (outermost first).
///
/// `levels` names one array-valued key per nesting level, e.g.
/// `["templates", "anps", "epgs"]`. A missing key or non-array value
/// is treated as an empty collection: schema documents omit
/// collections that have no members.
pub fn descend<'v>(
    doc: &'v Document,
    levels: &[&str],
    visit: &mut dyn FnMut(&[&'v Document], &'v Document) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    let mut ancestors = Vec::with_capacity(levels.len().saturating_sub(1));
    descend_level(doc, levels, &mut ancestors, visit)
}

fn descend_level<'v>(
    node: &'v Document,
    levels: &[&str],
    ancestors: &mut Vec<&'v Document>,
    visit: &mut dyn FnMut(&[&'v Document], &'v Document) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    let Some((level, rest)) = levels.split_first() else {
        return Ok(());
    };

    let Some(children) = node.get(level).and_then(Document::as_array) else {
        return Ok(());
    };

    for child in children {
        if rest.is_empty() {
            visit(ancestors, child)?;
        } else {
            ancestors.push(child);
            descend_level(child, rest, ancestors, visit)?;
            ancestors.pop();
        }
    }
    Ok(())
}

//! Minimal structural rules every conversion needs.

use crate::context::Context;
use crate::marker::MARKER_LINE_BREAK;
use crate::node::Node;
use crate::register::{Plugin, Priority, Register, RenderStatus};
use crate::utilities::{is_block, is_removed};
use crate::writer::Writer;
use crate::Result;

/// Drops non-content elements, turns `<br>` into hard line breaks and keeps
/// block elements apart with blank lines.
///
/// Included in every [`Converter`](crate::Converter).
#[derive(Debug, Default, Clone, Copy)]
pub struct BasePlugin;

impl BasePlugin {
    pub(crate) const NAME: &'static str = "base";

    pub(crate) fn register_rules(register: &mut Register) {
        register.renderer(render_base, Priority::STANDARD);
    }
}

impl Plugin for BasePlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn init(&self, register: &mut Register) -> Result<()> {
        Self::register_rules(register);
        Ok(())
    }
}

fn render_base(ctx: &mut Context<'_>, w: &mut dyn Writer, node: &Node) -> Result<RenderStatus> {
    let tag = node.tag_name();

    if is_removed(&tag) {
        return Ok(RenderStatus::Success);
    }
    if tag == "br" {
        w.write_char(MARKER_LINE_BREAK);
        return Ok(RenderStatus::Success);
    }
    if is_block(&tag) {
        w.write_str("\n\n");
        ctx.render_child_nodes(w, node)?;
        w.write_str("\n\n");
        return Ok(RenderStatus::Success);
    }

    Ok(RenderStatus::TryNext)
}

//! Human-readable dumps of mirrored types.
//!
//! # Example
//!
//! ```text
//! velocity_component (aggregate, host VelocityComponent)
//!   context entity: entity
//!   x_velocity: float
//!   move_left_animation: animation
//! animation (adapted via from_frames, host Animation)
//!   frames: list<string>
//!   frame_time: int
//! ```

use std::fmt::Write;

use crate::descriptor::TypeForm;
use crate::scope::ScopeId;
use crate::symbol::{SymbolId, SymbolKind};
use crate::table::SymbolTable;
use crate::types::{IType, TypeRef};

/// Configuration for rendering.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// Whether to show the mirrored host type names.
    pub show_host_names: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_host_names: true,
        }
    }
}

/// Renders one type with its members.
#[must_use]
pub fn render(table: &SymbolTable, ty: TypeRef) -> String {
    render_with_config(table, ty, &PrettyConfig::default())
}

/// Renders one type with a custom configuration.
#[must_use]
pub fn render_with_config(table: &SymbolTable, ty: TypeRef, config: &PrettyConfig) -> String {
    let mut printer = TypePrinter::new(table, config);
    printer.print_type(ty);
    printer.output
}

/// Renders every aggregate and adapted type bound in `scope`, sorted by name.
#[must_use]
pub fn render_scope(table: &SymbolTable, scope: ScopeId) -> String {
    let config = PrettyConfig::default();
    let mut printer = TypePrinter::new(table, &config);
    for (_, ty) in table.types_in(scope) {
        if table.ty(ty).member_scope().is_some() {
            printer.print_type(ty);
        }
    }
    printer.output
}

struct TypePrinter<'a> {
    table: &'a SymbolTable,
    config: &'a PrettyConfig,
    output: String,
}

impl<'a> TypePrinter<'a> {
    fn new(table: &'a SymbolTable, config: &'a PrettyConfig) -> Self {
        Self {
            table,
            config,
            output: String::new(),
        }
    }

    fn print_type(&mut self, ty: TypeRef) {
        let name = self.table.type_name(ty);
        let host = self.table.host_type(ty).map(|host| host.name());
        let heading = match self.table.ty(ty) {
            IType::Aggregate(agg) if agg.form() == TypeForm::Record => "record".to_string(),
            IType::Aggregate(_) => "aggregate".to_string(),
            IType::Adapted(adapted) => format!("adapted via {}", adapted.builder()),
            IType::BuiltIn(_) => "built-in".to_string(),
            IType::Function(_) => "function".to_string(),
            IType::List(_) | IType::Set(_) | IType::Graph(_) => "container".to_string(),
        };

        match host {
            Some(host) if self.config.show_host_names => {
                let _ = writeln!(self.output, "{name} ({heading}, host {host})");
            }
            _ => {
                let _ = writeln!(self.output, "{name} ({heading})");
            }
        }

        for id in self.table.context_parameters(ty) {
            self.print_member(*id);
        }
        for id in self.table.members(ty) {
            self.print_member(*id);
        }
    }

    fn print_member(&mut self, id: SymbolId) {
        let symbol = self.table.symbol(id);
        let prefix = match symbol.kind() {
            SymbolKind::Context => "context ",
            SymbolKind::Callback => "callback ",
            _ => "",
        };
        let _ = writeln!(
            self.output,
            "{:indent$}{prefix}{}: {}",
            "",
            symbol.name(),
            self.table.type_name(symbol.data_type()),
            indent = self.config.indent_width
        );
    }
}

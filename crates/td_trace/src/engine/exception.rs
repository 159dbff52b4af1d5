use alloc::string::{String, ToString};
use alloc::vec::Vec;

use td_reflect::Trace;
use td_reflect::ops::{DatabaseError, DatabaseException, Exception, TraceRef, best_effort};
use td_utils::IdentitySet;

use super::{COUNT_ATTRIBUTE, TraceSerializer};
use crate::document::DocWriter;

/// Tag of nested exceptions and of the collapsed placeholder.
pub const INNER_EXCEPTION_NAME: &str = "InnerException";
/// Tag of database error detail records.
pub const DATABASE_ERROR_NAME: &str = "Error";

fn field(out: &mut DocWriter, name: &str, value: Option<String>) {
    if let Some(value) = value {
        out.element_string(name, value);
    }
}

/// The simple name of a type path: the last segment, without generics.
fn simple_name(path: &str) -> &str {
    let path = path.split('<').next().unwrap_or(path);
    path.rsplit("::").next().unwrap_or(path)
}

/// Collects the inner exceptions of `exception`, without repeating an
/// instance that is both the single inner exception and a member of the
/// aggregate collection. Identity is by address, so distinct zero-sized
/// errors collapse into one entry.
pub(crate) fn inner_exceptions(exception: &dyn Exception) -> Vec<&dyn Trace> {
    let mut seen = IdentitySet::new();
    let mut inner = Vec::new();

    if let Some(Some(first)) = best_effort(|| exception.inner_exception())
        && !first.is_null()
    {
        seen.insert(first);
        inner.push(first);
    }
    if exception.is_aggregate()
        && let Some(all) = best_effort(|| exception.inner_exceptions())
    {
        for item in all {
            if !item.is_null() && seen.insert(item) {
                inner.push(item);
            }
        }
    }
    inner
}

impl TraceSerializer {
    pub(super) fn exception_tag(&self, value: &dyn Trace, exception: &dyn Exception) -> String {
        match best_effort(|| Ok(exception.exception_type())).flatten() {
            Some(type_name) => String::from(simple_name(&type_name)),
            None => self.tag_name(value.trace_desc()),
        }
    }

    pub(super) fn write_exception(
        &self,
        out: &mut DocWriter,
        name: &str,
        value: &dyn Trace,
        exception: &dyn Exception,
        max_depth: i32,
    ) {
        out.start_element(name);

        let type_name = best_effort(|| Ok(exception.exception_type()))
            .flatten()
            .unwrap_or_else(|| String::from(value.trace_desc().display_name()));
        out.attribute("Type", type_name);

        field(out, "Message", best_effort(|| exception.message()));
        field(out, "Source", best_effort(|| exception.source_name()).flatten());

        if let Some(database) = exception.as_database() {
            self.write_database_fields(out, database);
        }

        field(out, "TargetSite", best_effort(|| exception.target_site()).flatten());
        field(out, "StackTrace", best_effort(|| exception.stack_trace()).flatten());

        let inner = inner_exceptions(exception);
        if !inner.is_empty() {
            if max_depth > 0 {
                for item in inner {
                    self.write_inner_exception(out, item, max_depth - 1);
                }
            } else {
                out.start_element(INNER_EXCEPTION_NAME);
                out.attribute(COUNT_ATTRIBUTE, inner.len().to_string());
                out.end_element();
            }
        }

        out.end_element();
    }

    fn write_inner_exception(&self, out: &mut DocWriter, item: &dyn Trace, max_depth: i32) {
        match item.trace_ref() {
            TraceRef::Exception(exception) => {
                self.write_exception(out, INNER_EXCEPTION_NAME, item, exception, max_depth);
            }
            _ => self.serialize_with_depth(out, Some(item), max_depth),
        }
    }

    fn write_database_fields(&self, out: &mut DocWriter, database: &dyn DatabaseException) {
        field(out, "Class", best_effort(|| database.class()).map(|v| v.to_string()));
        field(out, "ErrorCode", best_effort(|| database.error_code()).map(|v| v.to_string()));
        field(out, "State", best_effort(|| database.state()).map(|v| v.to_string()));
        field(out, "LineNumber", best_effort(|| database.line_number()).map(|v| v.to_string()));
        field(out, "Number", best_effort(|| database.number()).map(|v| v.to_string()));
        field(out, "Procedure", best_effort(|| database.procedure()).flatten());
        field(out, "Server", best_effort(|| database.server()).flatten());

        for record in best_effort(|| database.errors()).unwrap_or_default() {
            self.write_database_error(out, record);
        }
    }

    pub(super) fn write_database_error(&self, out: &mut DocWriter, record: &dyn DatabaseError) {
        out.start_element(DATABASE_ERROR_NAME);
        field(out, "Message", best_effort(|| record.message()));
        field(out, "Source", best_effort(|| record.source_name()).flatten());
        field(out, "Class", best_effort(|| record.class()).map(|v| v.to_string()));
        field(out, "State", best_effort(|| record.state()).map(|v| v.to_string()));
        field(out, "LineNumber", best_effort(|| record.line_number()).map(|v| v.to_string()));
        field(out, "Number", best_effort(|| record.number()).map(|v| v.to_string()));
        field(out, "Procedure", best_effort(|| record.procedure()).flatten());
        field(out, "Server", best_effort(|| record.server()).flatten());
        out.end_element();
    }
}

#[cfg(test)]
mod tests {
    use super::simple_name;

    #[test]
    fn simple_names() {
        assert_eq!(simple_name("std::io::Error"), "Error");
        assert_eq!(simple_name("app::Wrapped<app::Inner>"), "Wrapped");
        assert_eq!(simple_name("Plain"), "Plain");
    }
}

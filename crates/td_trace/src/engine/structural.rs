use alloc::string::{String, ToString};

use td_reflect::Trace;
use td_reflect::ops::TraceRef;

use super::TraceSerializer;
use crate::StructuralError;
use crate::contract::{Contract, StructuralPlan};
use crate::document::DocWriter;
use crate::ser::{self, ENTRY_NAME, KEY_ATTRIBUTE};

impl TraceSerializer {
    /// Attempts a structural serialization of `value` into `out`.
    ///
    /// The attempt is built in a detached fragment and committed only on
    /// success. Success caches the contract and primes the element types of
    /// enumerables; failure evicts the contract.
    pub(super) fn try_structural(&self, out: &mut DocWriter, value: &dyn Trace) -> bool {
        let Some((contract, cached)) = self.contracts.get_or_derive(value) else {
            return false;
        };

        let mut fragment = DocWriter::new();
        match self.write_structural(&mut fragment, value, contract.plan) {
            Ok(()) => {
                out.append(fragment.into_nodes());
                if !cached {
                    self.contracts.insert(contract);
                }
                match value.trace_ref() {
                    TraceRef::Sequence(sequence) => {
                        self.contracts.prime(sequence.iter());
                    }
                    TraceRef::Dictionary(dictionary) => {
                        self.contracts
                            .prime(dictionary.iter().flat_map(|(key, item)| [key, item]));
                    }
                    _ => {}
                }
                true
            }
            Err(error) => {
                let name = contract.desc.display_name();
                if cached {
                    log::warn!("structural serialization of `{name}` failed: {error}");
                } else {
                    log::debug!("structural serialization of `{name}` failed: {error}");
                }
                if !contract.desc.is_object() {
                    self.contracts.evict(contract.desc);
                }
                false
            }
        }
    }

    fn write_structural(
        &self,
        out: &mut DocWriter,
        value: &dyn Trace,
        plan: StructuralPlan,
    ) -> Result<(), StructuralError> {
        let desc = value.trace_desc();
        let mismatch = || StructuralError::NoContract(String::from(desc.display_name()));

        match (plan, value.trace_ref()) {
            (StructuralPlan::Primitive, TraceRef::Primitive(primitive)) => {
                self.start_typed(out, desc);
                let text = primitive.to_string();
                if !text.is_empty() {
                    out.text(text);
                }
                out.end_element();
            }
            (StructuralPlan::Text, TraceRef::Text(text)) => {
                self.start_typed(out, desc);
                if !text.is_empty() {
                    out.text(text);
                }
                out.end_element();
            }
            (StructuralPlan::Serde, _) => {
                let contract = value.as_serialize().ok_or_else(mismatch)?;
                self.start_typed(out, desc);
                ser::to_writer(out, contract)?;
                out.end_element();
            }
            (StructuralPlan::Sequence, TraceRef::Sequence(sequence)) => {
                self.start_typed(out, desc);
                for item in sequence.iter() {
                    self.write_structural_item(out, item)?;
                }
                out.end_element();
            }
            (StructuralPlan::Dictionary, TraceRef::Dictionary(dictionary)) => {
                self.start_typed(out, desc);
                for (key, item) in dictionary.iter() {
                    let key = scalar_key(key)?;
                    out.start_element(ENTRY_NAME);
                    out.attribute(KEY_ATTRIBUTE, key);
                    self.write_structural_item(out, item)?;
                    out.end_element();
                }
                out.end_element();
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    fn write_structural_item(&self, out: &mut DocWriter, item: &dyn Trace) -> Result<(), StructuralError> {
        if item.is_null() {
            self.write_null(out);
            return Ok(());
        }
        let Some((Contract { plan, .. }, _)) = self.contracts.get_or_derive(item) else {
            return Err(StructuralError::NoContract(String::from(
                item.trace_desc().display_name(),
            )));
        };
        self.write_structural(out, item, plan)
    }
}

fn scalar_key(key: &dyn Trace) -> Result<String, StructuralError> {
    match key.trace_ref() {
        TraceRef::Primitive(primitive) => Ok(primitive.to_string()),
        TraceRef::Text(text) => Ok(String::from(text)),
        TraceRef::Enum(member) => Ok(member
            .variant_name()
            .map_or_else(|| member.underlying().to_string(), String::from)),
        shape => Err(StructuralError::CompositeKey(shape.kind_name())),
    }
}

//! In-memory cliente table backing the reference service.

use crate::domain::cliente::{ClienteRecord, TipoDocumento};
use std::collections::BTreeMap;

/// Records keyed by id, iterated in id order. Ids are assigned sequentially from 1
/// and never reused.
#[derive(Debug, Clone)]
pub struct ClienteStore {
    records: BTreeMap<i64, ClienteRecord>,
    next_id: i64,
}

impl ClienteStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// A store holding one DNI and one RUC cliente.
    pub fn with_samples() -> Self {
        let mut store = Self::new();
        store.insert(ClienteRecord::new(
            "Ana",
            "Diaz",
            "987654321",
            "ana.diaz@example.com",
            TipoDocumento::Dni,
            "12345678",
        ));
        store.insert(ClienteRecord::new(
            "Comercial",
            "Andina SAC",
            "014567890",
            "ventas@andina.example.com",
            TipoDocumento::Ruc,
            "20123456789",
        ));
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn list(&self) -> Vec<ClienteRecord> {
        self.records.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<ClienteRecord> {
        self.records.get(&id).cloned()
    }

    /// Stores `record` under a fresh id, ignoring any id it carries.
    pub fn insert(&mut self, record: ClienteRecord) -> ClienteRecord {
        let id = self.next_id;
        self.next_id += 1;
        let stored = record.with_id(id);
        self.records.insert(id, stored.clone());
        stored
    }

    /// Full replace; `None` when `id` is unknown.
    pub fn replace(&mut self, id: i64, record: ClienteRecord) -> Option<ClienteRecord> {
        let slot = self.records.get_mut(&id)?;
        *slot = record.with_id(id);
        Some(slot.clone())
    }

    /// Overwrites only the non-blank fields of `patch`.
    pub fn patch(&mut self, id: i64, patch: &ClienteRecord) -> Option<ClienteRecord> {
        let slot = self.records.get_mut(&id)?;
        slot.merge_non_blank(patch);
        Some(slot.clone())
    }

    pub fn remove(&mut self, id: i64) -> Option<ClienteRecord> {
        self.records.remove(&id)
    }

    /// Id of another record already holding this document, if any.
    pub fn document_holder(
        &self,
        tipo: &TipoDocumento,
        numero: &str,
        except: Option<i64>,
    ) -> Option<i64> {
        self.records
            .values()
            .find(|r| {
                r.id != except && &r.tipo_documento == tipo && r.numero_documento.trim() == numero.trim()
            })
            .and_then(|r| r.id)
    }

    pub fn by_tipo(&self, tipo: &TipoDocumento) -> Vec<ClienteRecord> {
        self.records
            .values()
            .filter(|r| &r.tipo_documento == tipo)
            .cloned()
            .collect()
    }
}

impl Default for ClienteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let mut store = ClienteStore::with_samples();
        assert_eq!(store.len(), 2);
        assert_eq!(store.remove(2).and_then(|r| r.id), Some(2));
        let third = store.insert(ClienteRecord::new("Luis", "Rojas", "3", "l@r.pe", "DNI", "44556677").with_id(99));
        assert_eq!(third.id, Some(3));
    }

    #[test]
    fn replace_and_patch_keep_identity() {
        let mut store = ClienteStore::with_samples();
        let replaced = store
            .replace(1, ClienteRecord::new("Ana", "Diaz Soto", "1", "a@b.c", "DNI", "12345678").with_id(7))
            .unwrap();
        assert_eq!(replaced.id, Some(1));
        assert_eq!(replaced.apellido, "Diaz Soto");

        let patch = ClienteRecord {
            email: "nuevo@b.c".into(),
            ..Default::default()
        };
        let patched = store.patch(1, &patch).unwrap();
        assert_eq!(patched.email, "nuevo@b.c");
        assert_eq!(patched.apellido, "Diaz Soto");
        assert!(store.patch(42, &patch).is_none());
    }

    #[test]
    fn filters_by_document_type() {
        let store = ClienteStore::with_samples();
        assert_eq!(store.by_tipo(&TipoDocumento::Ruc).len(), 1);
        assert_eq!(store.by_tipo(&TipoDocumento::Other("CE".into())).len(), 0);
    }
}

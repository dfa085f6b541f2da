use camino::Utf8PathBuf;

use crate::store::{JsonFileStore, StoreError};

/// Errors that can occur while operating on the number list. As with the
/// inventory, everything except `Store` is recoverable and leaves the list
/// untouched.
#[derive(thiserror::Error, Debug)]
pub enum ListError {
    #[error("Position {position} is out of range for a list of {len} element(s)")]
    PositionOutOfRange { position: i64, len: usize },
    #[error("Element {element} not found in the list")]
    ElementNotFound { element: i64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An ordered sequence of integers persisted as a JSON array. Duplicates are
/// allowed and order is significant; elements are addressed by index.
///
/// Positions cross this API as `i64` so that a negative position arriving
/// from user input is representable and rejected by the bounds check rather
/// than mangled by an unsigned conversion at the parse site. Out-of-range
/// positions are always rejected, never clamped.
///
/// Mutating operations rewrite the whole backing file. `clear` is the one
/// exception: it deletes the file instead of writing an empty array.
pub struct NumberList {
    values: Vec<i64>,
    store: JsonFileStore<Vec<i64>>,
}

impl NumberList {
    /// Opens the list backed by the JSON file at `path`. A missing file
    /// opens as an empty list.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<NumberList, StoreError> {
        let store = JsonFileStore::at(path);
        let values = store.load()?;
        Ok(NumberList { values, store })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Inserts `element` at `position`, shifting later elements right.
    /// Valid positions run from 0 through the current length inclusive.
    pub fn insert(&mut self, element: i64, position: i64) -> Result<(), ListError> {
        let index = self.checked_index(position, self.values.len() + 1)?;
        self.values.insert(index, element);
        self.store.save(&self.values)?;
        Ok(())
    }

    /// Removes the first occurrence of `element` by value.
    pub fn remove(&mut self, element: i64) -> Result<(), ListError> {
        let index = self.values.iter().position(|&v| v == element)
            .ok_or(ListError::ElementNotFound { element })?;
        self.values.remove(index);
        self.store.save(&self.values)?;
        Ok(())
    }

    /// Appends `element` at the end.
    pub fn append(&mut self, element: i64) -> Result<(), ListError> {
        self.values.push(element);
        self.store.save(&self.values)?;
        Ok(())
    }

    /// Index of the first occurrence of `element`, if any. Never mutates.
    pub fn find(&self, element: i64) -> Option<usize> {
        self.values.iter().position(|&v| v == element)
    }

    /// Overwrites the element at `position`. Valid positions run from 0
    /// through the current length exclusive.
    pub fn update(&mut self, position: i64, new_element: i64) -> Result<(), ListError> {
        let index = self.checked_index(position, self.values.len())?;
        self.values[index] = new_element;
        self.store.save(&self.values)?;
        Ok(())
    }

    /// Empties the list and deletes the backing file entirely.
    pub fn clear(&mut self) -> Result<(), ListError> {
        self.values.clear();
        self.store.delete()?;
        Ok(())
    }

    fn checked_index(&self, position: i64, valid_range_len: usize) -> Result<usize, ListError> {
        let out_of_range = ListError::PositionOutOfRange { position, len: self.values.len() };
        if position < 0 {
            return Err(out_of_range);
        }
        let index = usize::try_from(position).map_err(|_| out_of_range)?;
        if index >= valid_range_len {
            return Err(ListError::PositionOutOfRange { position, len: self.values.len() });
        }
        Ok(index)
    }
}

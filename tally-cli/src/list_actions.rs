use tally_core::NumberList;
use tally_core::numlist::ListError;
use tally_core::store::StoreError;

/// One action against the number list, already parsed and arity-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListAction {
    Insert { element: i64, position: i64 },
    Remove { element: i64 },
    Append { element: i64 },
    Print,
    Clear,
    Find { element: i64 },
    Update { position: i64, new_element: i64 },
}

/// Applies one action to the list and prints the outcome.
///
/// Returns `Ok(true)` when the action succeeded and `Ok(false)` when it was
/// rejected with a recoverable error (already reported to the user). Store
/// errors bubble up for the caller to treat as fatal.
pub fn execute(list: &mut NumberList, action: ListAction) -> Result<bool, StoreError> {
    let result = match action {
        ListAction::Insert { element, position } => list.insert(element, position),
        ListAction::Remove { element } => list.remove(element),
        ListAction::Append { element } => list.append(element),
        ListAction::Update { position, new_element } => list.update(position, new_element),
        ListAction::Print => {
            println!("Current list: {:?}", list.values());
            return Ok(true);
        },
        ListAction::Find { element } => {
            // -1 is the not-found sentinel
            let index = list.find(element).map(|i| i as i64).unwrap_or(-1);
            println!("Index of {element}: {index}");
            return Ok(true);
        },
        ListAction::Clear => {
            match list.clear() {
                Ok(()) => {
                    println!("List has been cleared.");
                    return Ok(true);
                },
                Err(e) => Err(e),
            }
        },
    };

    match result {
        Ok(()) => {
            println!("Modified list: {:?}", list.values());
            Ok(true)
        },
        Err(ListError::Store(e)) => Err(e),
        Err(e) => {
            println!("Error: {e}");
            Ok(false)
        },
    }
}

use std::error::Error;

use tally_core::Inventory;
use tally_core::inventory::{Deduction, InventoryError};

use crate::utility::{confirm, parse_price, parse_quantity, prompt};

/// Runs the interactive menu loop until the user picks the exit option.
///
/// Recoverable problems (bad input, unknown items, insufficient stock) are
/// reported inline and drop back to the menu. Only store errors escape, and
/// those terminate the program.
pub fn run(inventory: &mut Inventory) -> Result<(), Box<dyn Error>> {
    loop {
        display_menu();
        let choice = prompt("Enter your choice (1-7): ");

        match choice.as_str() {
            "1" => add_item(inventory)?,
            "2" => remove_item(inventory)?,
            "3" => print_inventory(inventory),
            "4" => find_item(inventory),
            "5" => deduct_quantity(inventory)?,
            "6" => adjust_price(inventory)?,
            "7" => {
                println!("Exiting the program. Goodbye!");
                return Ok(());
            },
            _ => println!("Invalid choice. Please enter a number between 1 and 7."),
        }
    }
}

fn display_menu() {
    println!("\nMenu:");
    println!("1. Add an item");
    println!("2. Remove an item");
    println!("3. Print the inventory");
    println!("4. Find an item's details");
    println!("5. Deduct quantity from an item");
    println!("6. Adjust the price of an item");
    println!("7. Exit");
}

fn add_item(inventory: &mut Inventory) -> Result<(), Box<dyn Error>> {
    let item = prompt("Enter the item name to add/update: ");
    let entered = prompt(&format!("Enter the quantity for '{item}': "));
    let Some(quantity) = parse_quantity(&entered) else {
        println!("Invalid quantity. Please enter a positive number.");
        return Ok(());
    };

    let existed = inventory.contains(&item);
    let price = match inventory.price_of(&item) {
        Some(current) => {
            println!("Current price for '{item}' is {current:.2}.");
            let entered = prompt(
                &format!("Enter the price for '{item}' (or press Enter to keep the current price): "));
            if entered.is_empty() {
                None
            } else {
                match parse_price(&entered) {
                    Some(price) => Some(price),
                    None => {
                        println!("Invalid price. Please enter a positive number.");
                        return Ok(());
                    },
                }
            }
        },
        None => {
            let entered = prompt(&format!("Enter the price for '{item}': "));
            match parse_price(&entered) {
                Some(price) => Some(price),
                None => {
                    println!("Invalid price. Please enter a positive number.");
                    return Ok(());
                },
            }
        },
    };

    match inventory.add(&item, quantity, price) {
        Ok(record) if existed => println!("Updated '{item}': quantity {}, price {:.2}.",
            record.quantity, record.price),
        Ok(record) => println!("Added '{item}' with quantity {} and price {:.2}.",
            record.quantity, record.price),
        Err(InventoryError::Store(e)) => return Err(e.into()),
        Err(e) => println!("{e}."),
    }
    Ok(())
}

fn remove_item(inventory: &mut Inventory) -> Result<(), Box<dyn Error>> {
    let item = prompt("Enter the item name to remove: ");
    if !inventory.contains(&item) {
        println!("'{item}' is not in the inventory.");
        return Ok(());
    }

    println!("Warning: You are about to remove '{item}' from the inventory.");
    if confirm("Are you sure? (yes/no): ") {
        match inventory.remove(&item) {
            Ok(()) => println!("'{item}' has been removed from the inventory."),
            Err(InventoryError::Store(e)) => return Err(e.into()),
            Err(e) => println!("{e}."),
        }
    } else {
        println!("'{item}' was not removed.");
    }
    Ok(())
}

fn print_inventory(inventory: &Inventory) {
    let lines = inventory.list_all();
    if lines.is_empty() {
        println!("The inventory is empty.");
        return;
    }

    println!("\n{:<20}{:<10}{:<10}{:<10}", "Item", "Quantity", "Price", "Total");
    println!("{}", "-".repeat(50));
    for line in lines {
        println!("{:<20}{:<10}{:<10.2}{:<10.2}", line.name, line.quantity, line.price, line.total);
    }
    println!("{}", "-".repeat(50));
}

fn find_item(inventory: &Inventory) {
    let item = prompt("Enter the item name to find: ");
    match inventory.find(&item) {
        Some(line) => println!("'{item}' has quantity {}, price {:.2}, and total value {:.2}.",
            line.quantity, line.price, line.total),
        None => println!("'{item}' is not in the inventory."),
    }
}

fn deduct_quantity(inventory: &mut Inventory) -> Result<(), Box<dyn Error>> {
    loop {
        let item = prompt("Enter the item name to deduct from (or enter '?' to view the inventory): ");
        if item == "?" {
            print_inventory(inventory);
            continue;
        }
        if !inventory.contains(&item) {
            println!("'{item}' is not in the inventory.");
            continue;
        }

        let entered = prompt(&format!("Enter the quantity to deduct from '{item}': "));
        let Some(quantity) = parse_quantity(&entered) else {
            println!("Invalid quantity. Please enter a positive number.");
            return Ok(());
        };

        match inventory.deduct(&item, quantity) {
            Ok(Deduction::Remaining(remaining)) =>
                println!("Deducted {quantity} from '{item}'. Remaining quantity: {remaining}."),
            Ok(Deduction::Depleted) => {
                println!("Deducted {quantity} from '{item}'. Remaining quantity: 0.");
                println!("'{item}' has been removed from the inventory as its quantity is now 0.");
            },
            Err(InventoryError::InsufficientStock { available, .. }) =>
                println!("Cannot deduct {quantity}. '{item}' only has {available} in stock."),
            Err(InventoryError::Store(e)) => return Err(e.into()),
            Err(e) => println!("{e}."),
        }
        return Ok(());
    }
}

fn adjust_price(inventory: &mut Inventory) -> Result<(), Box<dyn Error>> {
    let item = prompt("Enter the item name to adjust the price: ");
    let Some(current) = inventory.price_of(&item) else {
        println!("'{item}' is not in the inventory.");
        return Ok(());
    };

    println!("Current price for '{item}' is {current:.2}.");
    let entered = prompt(&format!("Enter the new price for '{item}': "));
    let Some(new_price) = parse_price(&entered) else {
        println!("Invalid price. Please enter a positive number.");
        return Ok(());
    };

    match inventory.adjust_price(&item, new_price) {
        Ok(()) => println!("Updated price for '{item}' is now {new_price:.2}."),
        Err(InventoryError::Store(e)) => return Err(e.into()),
        Err(e) => println!("{e}."),
    }
    Ok(())
}

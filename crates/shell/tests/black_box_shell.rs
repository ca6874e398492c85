use std::io::Cursor;
use std::path::PathBuf;

use stockledger_catalog::read_csv;
use stockledger_shell::Shell;

/// Run a whole session through the loop and return everything it printed.
fn run_session(script: &str) -> String {
    let mut shell = Shell::new().with_prompt("");
    let mut out = Vec::new();
    shell.run(Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn temp_csv(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("stockledger-{}-{}.csv", name, std::process::id()))
}

#[test]
fn widget_scenario() {
    let out = run_session(
        "save_product P1 Widget 10.0\n\
         purchase_product P1 100 8.0\n\
         order_product P1 20\n\
         get_quantity_of_product P1\n\
         get_average_price P1\n\
         get_product_profit P1\n\
         get_orders_report\n\
         exit\n",
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "80",
            "8.00",
            "40.00",
            "{\"ProductID\":\"P1\",\"ProductName\":\"Widget\",\"COGS\":160.0,\"Quantity\":20,\"Price\":10.0,\"SellPrice\":200.0}",
        ]
    );
}

#[test]
fn errors_are_reported_and_the_loop_continues() {
    let out = run_session(
        "get_fewest_product\n\
         save_product P1 Widget 10\n\
         order_product P1 5\n\
         purchase_product P9 1 1\n\
         purchase_product P1 ten 1\n\
         order_product P1\n\
         sell P1 1\n\
         purchase_product P1 3 2\n\
         get_quantity_of_product P1\n",
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "No products",
            "Insufficient stock for P1: requested 5, available 0",
            "Product with ID P9 not found",
            "purchase_product: invalid value 'ten' for <quantity>",
            "order_product: missing argument <quantity>",
            "Invalid command: sell",
            "3",
        ]
    );
}

#[test]
fn quantity_overflow_is_reported_and_the_loop_continues() {
    let out = run_session(
        "save_product P1 Widget 1\n\
         purchase_product P1 9223372036854775807 1\n\
         purchase_product P1 1 1\n\
         get_quantity_of_product P1\n\
         save_product P2 Gadget 1\n\
         purchase_product P2 1 1\n\
         order_product P2 -9223372036854775808\n\
         get_quantity_of_product P2\n\
         get_orders_report\n",
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Quantity overflow for P1",
            "9223372036854775807",
            "Quantity overflow for P2",
            "1",
        ]
    );
}

#[test]
fn exit_stops_reading() {
    let out = run_session("save_product P1 Widget 1\nexit\nget_quantity_of_product P1\n");
    assert_eq!(out, "");
}

#[test]
fn prompt_is_printed_before_each_read() {
    let mut shell = Shell::new().with_prompt("> ");
    let mut out = Vec::new();
    shell
        .run(Cursor::new("save_product P1 Widget 1\nget_fewest_product\n"), &mut out)
        .unwrap();
    // Two commands, then a final prompt that hits end of input.
    assert_eq!(String::from_utf8(out).unwrap(), "> > Widget\n> ");
}

#[test]
fn resaving_keeps_stock_and_history() {
    let out = run_session(
        "save_product P1 Widget 10\n\
         purchase_product P1 10 2\n\
         order_product P1 4\n\
         save_product P1 Gizmo 25\n\
         get_quantity_of_product P1\n\
         get_most_popular_product\n\
         get_orders_report\n",
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "6");
    assert_eq!(lines[1], "Gizmo");
    // Recorded at the old price, reported under the new name.
    assert!(lines[2].contains("\"ProductName\":\"Gizmo\""));
    assert!(lines[2].contains("\"Price\":10.0"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn fewest_and_most_popular_across_products() {
    let out = run_session(
        "save_product A Apple 1\n\
         save_product B Banana 2\n\
         save_product C Cherry 3\n\
         purchase_product A 10 0.5\n\
         purchase_product B 10 0.5\n\
         purchase_product C 10 0.5\n\
         order_product A 2\n\
         order_product B 7\n\
         order_product C 7\n\
         get_fewest_product\n\
         get_most_popular_product\n",
    );
    assert_eq!(out, "Banana\nBanana\n");
}

#[test]
fn export_round_trips_through_csv() {
    let path = temp_csv("export-round-trip");
    let script = format!(
        "save_product P1 Widget 10\n\
         save_product P2 Gadget 4\n\
         purchase_product P1 10 2\n\
         purchase_product P1 5 4\n\
         purchase_product P2 8 1.5\n\
         order_product P1 3\n\
         order_product P2 8\n\
         order_product P1 2\n\
         export_orders_report {}\n",
        path.display()
    );

    let mut shell = Shell::new().with_prompt("");
    let mut out = Vec::new();
    shell.run(Cursor::new(script), &mut out).unwrap();

    let file = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let text = String::from_utf8(file.clone()).unwrap();
    assert!(text.starts_with("ProductID,ProductName,COGS,Quantity,Price,SellPrice\n"));

    let read_back = read_csv(file.as_slice()).unwrap();
    let in_memory = shell.catalog().get_orders_report();
    assert_eq!(read_back, in_memory);

    let order: Vec<(&str, i64)> = read_back
        .iter()
        .map(|r| (r.product_id.as_str(), r.quantity))
        .collect();
    assert_eq!(order, vec![("P1", 3), ("P1", 2), ("P2", 8)]);
    for row in &read_back {
        assert!((row.sell_price - row.price * row.quantity as f64).abs() < 1e-9);
    }

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.ends_with(&format!("Exported 3 order(s) to {}\n", path.display())));
}

#[test]
fn export_of_empty_catalog_writes_header_only() {
    let path = temp_csv("export-empty");
    let out = run_session(&format!("export_orders_report {}\n", path.display()));
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(text, "ProductID,ProductName,COGS,Quantity,Price,SellPrice\n");
    assert!(out.starts_with("Exported 0 order(s)"));
}

use compact_token::types::Output;
use colored::*;
use serde_json::Value;

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn print_output(format: &str, output: &Output) {
    match format {
        "json" => match serde_json::to_string(output) {
            Ok(json_output) => println!("{}", json_output),
            Err(e) => eprintln!("{} {}", "[!]".red(), e),
        },
        _ => match output.status.as_str() {
            "issued" => {
                if let Some(token) = &output.token {
                    println!("{}", token);
                }
                eprintln!("{} {}", "[+]".green(), output.detail);
            }
            "valid" => println!("{} {}", "[+]".green(), output.detail.green()),
            "invalid" => println!("{} {}", "[-]".yellow(), output.detail.yellow()),
            "decoded" | "inspected" => {
                if let Some(header) = &output.header {
                    println!("{}", "Header:".cyan().bold());
                    println!("{}\n", pretty(header));
                }
                if let Some(claims) = &output.claims {
                    println!("{}", "Claims:".cyan().bold());
                    println!("{}", pretty(claims));
                }
                if !output.detail.is_empty() {
                    eprintln!("\n{} {}", "[*]".cyan(), output.detail);
                }
            }
            _ => eprintln!("{} {}", "[!]".red(), output.detail.red()),
        },
    }
}

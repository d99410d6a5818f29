pub mod commands;

use crate::cli::commands::{AvatarAction, Commands, ContextAction};
use crate::client::{AvatarFeed, ContextForm, FormState, ProxyClient};
use crate::payment::models::CheckoutRequest;
use crate::upstream::models::Pagination;

/// Splits `URL::FAQ` into its parts. A missing or empty FAQ yields only the url.
pub fn parse_link(raw: &str) -> (String, String) {
    match raw.split_once("::") {
        Some((url, faq)) => (url.trim().to_string(), faq.trim().to_string()),
        None => (raw.trim().to_string(), String::new()),
    }
}

pub async fn run_cli(command: Commands, server: &str) {
    let client = ProxyClient::new(server);

    match command {
        Commands::Serve => {
            panic!("Serve command should be intercepted by main.rs to boot actix-web");
        }
        Commands::Context { action } => match action {
            ContextAction::Create {
                name,
                prompt,
                opening_text,
                links,
            } => {
                let mut form = ContextForm::new();
                form.name = name;
                form.prompt = prompt;
                form.opening_text = opening_text.unwrap_or_default();
                for raw in &links {
                    let (url, faq) = parse_link(raw);
                    let row = form.add_link();
                    form.update_url(row, url);
                    form.update_faq(row, faq);
                }

                let mut state = FormState::new(form);
                if state.submit(&client).await {
                    if let Some(context) = &state.last_result {
                        println!("Context created successfully!");
                        println!(
                            "{}",
                            serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string())
                        );
                    }
                } else if let Some(error) = &state.error {
                    eprintln!("Error: {}", error);
                }
            }
            ContextAction::List { page, page_size } => {
                match client.list_contexts(&Pagination { page, page_size }).await {
                    Ok(contexts) => {
                        let results = contexts
                            .get("results")
                            .and_then(|r| r.as_array())
                            .cloned()
                            .unwrap_or_default();
                        if results.is_empty() {
                            println!("No contexts found.");
                        } else {
                            println!("{:<38} | {:<24} | {}", "ID", "Created At", "Name");
                            println!("{:-<38}-+-{:-<24}-+-{:-<20}", "", "", "");
                            for c in results {
                                println!(
                                    "{:<38} | {:<24} | {}",
                                    c["id"].as_str().unwrap_or("-"),
                                    c["created_at"].as_str().unwrap_or("-"),
                                    c["name"].as_str().unwrap_or("-")
                                );
                            }
                        }
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        },
        Commands::Avatars {
            action: AvatarAction::List,
        } => match AvatarFeed::spawn(client).wait().await {
            Ok(avatars) if avatars.is_empty() => println!("No public avatars found"),
            Ok(avatars) => {
                for a in avatars {
                    let expired = if a.is_expired { " (Expired)" } else { "" };
                    println!("{:<38} | {:<24} | {}{}", a.id, a.name, a.status, expired);
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Checkout { tier, price_id } => {
            let req = CheckoutRequest {
                tier_name: tier,
                price_id,
            };
            match client.checkout(&req).await {
                Ok(url) => println!("Continue checkout at: {}", url),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }
}

use clap::Parser;
use client::game::{ClientGameState, Menu};
use client::input::{parse_game_input, parse_menu_choice};
use client::network::Connection;
use client::rendering::{render_menu, render_response};
use env_logger::Env;
use log::{error, info};
use shared::Request;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8888")]
    server: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    info!("Connecting to: {}", args.server);
    let mut connection = match Connection::connect(&args.server).await {
        Ok(connection) => connection,
        Err(e) => {
            error!("Could not connect to {}: {}", args.server, e);
            return Err(e.into());
        }
    };
    println!("Connected to {}", connection.server_addr());

    let mut state = ClientGameState::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("{}", render_menu(state.menu));

        let Some(line) = lines.next_line().await? else {
            // stdin closed; leave politely
            connection.request(&Request::Quit).await?;
            break;
        };

        let request = match state.menu {
            Menu::NoName => Request::Name { name: line },
            Menu::Main => match parse_menu_choice(&line) {
                Some(choice) => choice.to_request(),
                None => {
                    println!("Unknown choice.");
                    continue;
                }
            },
            Menu::InGame => match parse_game_input(&line) {
                Some(input) => input.to_request(),
                None => {
                    println!("Unknown command.");
                    continue;
                }
            },
        };

        let response = connection.request(&request).await?;
        print!("{}", render_response(&response));
        state.apply(&request, &response);

        if request == Request::Quit {
            break;
        }
    }

    Ok(())
}

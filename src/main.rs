use std::path::PathBuf;

mod config;
mod display;
mod label;
mod log;
mod printer;
mod state;

use clap::Parser;
use tokio::sync::mpsc;

use config::{ConfigManager, DEFAULT_CONFIG_PATH};
use printer::{
    thread::{run_thread, PrinterCommand, PrinterResponse},
    transport::{BrotherQl, TransportOptions},
    Dispatcher,
};
use state::AppState;

#[derive(Parser, Debug)]
#[command(version, about = "Touchscreen kiosk that prints batch labels")]
struct Args {
    /// Save label previews instead of printing
    #[arg(long)]
    test: bool,

    /// Settings file, created with defaults when missing
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[cfg(feature = "window")]
async fn main_thread(
    mut app: AppState,
    tx: mpsc::Sender<PrinterCommand>,
    mut rx: mpsc::Receiver<PrinterResponse>,
) -> Result<(), Box<dyn std::error::Error>> {
    use std::time::{Duration, Instant};

    use chrono::Local;
    use debug_print::debug_println;
    use embedded_graphics::{geometry::Size, pixelcolor::Rgb888};
    use embedded_graphics_simulator::{
        sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
    };

    use display::screens;
    use state::{keypad::KeypadKey, UiEvent};

    let mut simulator = SimulatorDisplay::<Rgb888>::new(Size::new(display::WIDTH, display::HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Label Printer", &output_settings);

    'running: loop {
        // Drain replies from the print thread without blocking
        while let Ok(response) = rx.try_recv() {
            debug_println!("main got {}", response);
            app.on_response(response);
        }
        app.poll(Instant::now());

        screens::draw(&mut simulator, &app, &display::THEME)?;
        window.update(&simulator);

        let mut events = Vec::new();
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    let event = match keycode {
                        Keycode::Escape => break 'running,
                        Keycode::Num0 => Some(UiEvent::Key(KeypadKey::Digit(0))),
                        Keycode::Num1 => Some(UiEvent::Key(KeypadKey::Digit(1))),
                        Keycode::Num2 => Some(UiEvent::Key(KeypadKey::Digit(2))),
                        Keycode::Num3 => Some(UiEvent::Key(KeypadKey::Digit(3))),
                        Keycode::Num4 => Some(UiEvent::Key(KeypadKey::Digit(4))),
                        Keycode::Num5 => Some(UiEvent::Key(KeypadKey::Digit(5))),
                        Keycode::Num6 => Some(UiEvent::Key(KeypadKey::Digit(6))),
                        Keycode::Num7 => Some(UiEvent::Key(KeypadKey::Digit(7))),
                        Keycode::Num8 => Some(UiEvent::Key(KeypadKey::Digit(8))),
                        Keycode::Num9 => Some(UiEvent::Key(KeypadKey::Digit(9))),
                        Keycode::Backspace => Some(UiEvent::Key(KeypadKey::Backspace)),
                        Keycode::Delete => Some(UiEvent::Key(KeypadKey::Clear)),
                        Keycode::Return => Some(if app.dialog.is_some() {
                            UiEvent::DismissDialog
                        } else {
                            UiEvent::Submit
                        }),
                        _ => None,
                    };
                    events.extend(event);
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    app.pressed = screens::hit_test(&app, point).map(|hit| hit.name);
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    app.pressed = None;
                    if let Some(hit) = screens::hit_test(&app, point) {
                        debug_println!("pressed {}", hit.name);
                        events.push(hit.event);
                    }
                }
                _ => {}
            }
        }

        for event in events {
            let Some(request) = app.handle(event, Instant::now(), Local::now().naive_local())
            else {
                continue;
            };

            match request.render() {
                Ok(command) => tx.send(command).await?,
                Err(err) => app.on_response(PrinterResponse::Failed {
                    kind: request.kind(),
                    message: format!("Error: {}", err),
                }),
            }
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    println!("{} Window closed", log::STATE);
    tx.send(PrinterCommand::Shutdown).await?;
    Ok(())
}

#[cfg(not(feature = "window"))]
async fn main_thread(
    _app: AppState,
    _tx: mpsc::Sender<PrinterCommand>,
    _rx: mpsc::Receiver<PrinterResponse>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} Built without the window feature", log::ERROR);
    Err("no display available".into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // --------- CONFIG ---------
    let config = ConfigManager::load(&args.config).map_err(|err| {
        println!("{} {}", log::ERROR, err);
        err
    })?;
    println!(
        "{} Loaded {} ({} copies, {} hours drying)",
        log::CONFIG,
        config.path().display(),
        config.num_copies(),
        config.drying_time()
    );

    // --------- PRINTER SETUP ---------
    let dispatcher = if args.test {
        println!("{} Running in test mode, nothing will be printed", log::WARN);
        Dispatcher::dry_run(".")
    } else {
        Dispatcher::live(Box::new(BrotherQl::new(TransportOptions::default())), ".")
    };

    // Create a channel for communication between threads
    let (thread_tx, rx) = mpsc::channel::<PrinterResponse>(16);
    let (tx, thread_rx) = mpsc::channel::<PrinterCommand>(4);

    // Spawn the print thread
    let worker = tokio::task::spawn_blocking(move || run_thread(dispatcher, thread_tx, thread_rx));

    // Run the main thread
    let result = main_thread(AppState::new(config), tx, rx).await;
    worker.await?;
    result
}

use std::time::Duration;

use softmouse3d::backends::discover;
use softmouse3d::{ClickConfig, EventFilter, InputEvent, Softmouse3D};

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => ClickConfig::load(&path).expect("load config"),
        None => ClickConfig::default(),
    };

    let (_api, mut devices) = discover().expect("init hidapi");
    println!("Discovered {} softmouse 3D device(s)", devices.len());
    for d in &devices {
        println!("== {} ({}) {}", d.name(), d.id(), d.path());
    }

    let mut mouse = Softmouse3D::with_config(config);
    mouse.events_mut().add_listener(
        |e: &InputEvent| match serde_json::to_string(e) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("serialize: {err}"),
        },
        EventFilter::All,
    );

    loop {
        devices.retain_mut(|d| match d.poll(&mut mouse) {
            Ok(_) => true,
            Err(e) => {
                eprintln!("{e}; dropping device");
                mouse.forget_device(d.id());
                false
            }
        });
        if devices.is_empty() {
            break;
        }
        std::thread::sleep(Duration::from_millis(4));
    }
}

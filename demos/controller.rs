//! A simulated serial device controller driven by a behavior graph.
//!
//! The tree tries recovery strategies in priority order until one of them
//! gets a payload out. Leaf actions only consult (and print) the simulated
//! device state, so the run shows which branches each tick actually visits.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use behavior_graph::{load, parse_tree, Action, BehaviorResult, Registry};

const TREE: &str = "
# Try the cheap paths first; power down only when nothing else works.
tree = Selector Root {
    Sequence Transmit {
        CheckSerial
        WriteUTF8
    }
    Sequence Recover {
        Wait
        Reconnect
        ref Transmit
    }
    ForceQuit
}
";

#[derive(Debug)]
struct Device {
    serial_ok: bool,
    reconnects: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let device = Rc::new(RefCell::new(Device {
        serial_ok: false,
        reconnects: 0,
    }));

    let (_, item) = parse_tree(TREE).map_err(|e| anyhow!("parse error: {e}"))?;

    let mut registry = Registry::new();
    let resolver_device = device.clone();
    let root = load(&item, &mut registry, &mut move |name: &str| {
        let device = resolver_device.clone();
        match name {
            "CheckSerial" => Some(probe(device, name, |dev| dev.serial_ok)),
            "WriteUTF8" => Some(probe(device, name, |dev| dev.serial_ok)),
            "Wait" => Some(probe(device, name, |_| true)),
            "Reconnect" => Some(Box::new(move || {
                let mut dev = device.borrow_mut();
                dev.reconnects += 1;
                // The flaky link comes back on the second attempt.
                dev.serial_ok = dev.reconnects >= 2;
                println!("  Reconnect -> attempt {} ({:?})", dev.reconnects, result_of(dev.serial_ok));
                result_of(dev.serial_ok)
            })),
            "ForceQuit" => Some(probe(device, name, |_| true)),
            _ => None,
        }
    })
    .context("loading the controller tree")?;
    registry.set_root(root.name()).context("setting the root")?;

    for round in 1..=3 {
        println!("tick {round}:");
        let result = registry.tick().context("ticking the controller")?;
        println!("  => {result:?}\n");
    }

    println!("final device state: {:?}", device.borrow());
    Ok(())
}

/// An action that reads the device, prints its decision, and succeeds when
/// `check` holds.
fn probe(
    device: Rc<RefCell<Device>>,
    name: &str,
    check: impl Fn(&Device) -> bool + 'static,
) -> Action {
    let name = name.to_owned();
    Box::new(move || {
        let result = result_of(check(&device.borrow()));
        println!("  {name} -> {result:?}");
        result
    })
}

fn result_of(ok: bool) -> BehaviorResult {
    if ok {
        BehaviorResult::Success
    } else {
        BehaviorResult::Fail
    }
}

use sirocco::address::DeviceAddress;
use sirocco::entity::{Cover, Entity};
use sirocco::gateway::Gateway;
use sirocco::profile::{Profile, ProfileId};
use sirocco::telegram::Telegram;
use sirocco::travel::TravelTimes;
use tokio::sync::mpsc;

const DEVICE: [u8; 4] = [0x00, 0x00, 0x00, 0x04];
const SENDER: [u8; 4] = [0xFF, 0x80, 0x00, 0x04];

fn create_cover(travel: TravelTimes) -> (Cover, mpsc::UnboundedReceiver<Telegram>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let gateway = Gateway::new(123, "test gateway".to_string(), tx);
    let cover = Cover::new(
        gateway,
        "Living room shutter".to_string(),
        DeviceAddress::from_bytes(DEVICE),
        Profile::find(&ProfileId::parse("G5-3F-7F").unwrap()).unwrap(),
        DeviceAddress::from_bytes(SENDER),
        Profile::find(&ProfileId::parse("H5-3F-7F").unwrap()).unwrap(),
        Some("shutter".to_string()),
        travel,
    );
    (cover, rx)
}

fn status(data: [u8; 4]) -> Telegram {
    Telegram::FourBs {
        address: DEVICE,
        data,
    }
}

#[test]
fn starts_fully_open() {
    let (cover, _rx) = create_cover(TravelTimes::new(Some(25), Some(24)));
    assert_eq!(cover.position(), 100);
    assert!(!cover.is_closed());
    assert!(cover.supports_set_position());
}

#[test]
fn closed_status_overrides_estimate() {
    let (mut cover, _rx) = create_cover(TravelTimes::new(Some(20), Some(20)));

    // 8 s down travel: estimate drops to 60
    cover.value_changed(&status([0, 80, 0x02, 0x08]));
    assert_eq!(cover.position(), 60);
    assert!(!cover.is_closed());

    // discrete closed wins regardless of the estimate
    cover.value_changed(&status([0, 0, 0x50, 0x08]));
    assert_eq!(cover.position(), 0);
    assert!(cover.is_closed());
    assert!(!cover.is_opening());
    assert!(!cover.is_closing());
}

#[test]
fn open_status_overrides_estimate() {
    let (mut cover, _rx) = create_cover(TravelTimes::new(Some(20), Some(20)));
    cover.value_changed(&status([0, 80, 0x02, 0x08]));
    cover.value_changed(&status([0, 0, 0x70, 0x08]));
    assert_eq!(cover.position(), 100);
    assert!(!cover.is_closed());
}

#[test]
fn travel_updates_stay_within_bounds() {
    let (mut cover, _rx) = create_cover(TravelTimes::new(Some(10), Some(10)));

    // 60 s up on a 10 s travel: clamped at 100
    cover.value_changed(&status([0x02, 0x58, 0x01, 0x08]));
    assert_eq!(cover.position(), 100);

    // 60 s down: clamped at 0 and marked closed
    cover.value_changed(&status([0x02, 0x58, 0x02, 0x08]));
    assert_eq!(cover.position(), 0);
    assert!(cover.is_closed());
}

#[test]
fn moving_states_update_flags() {
    let (mut cover, _rx) = create_cover(TravelTimes::new(Some(20), Some(20)));

    cover.value_changed(&status([0, 0, 0x02, 0x08]));
    assert!(cover.is_closing());
    assert!(!cover.is_opening());

    cover.value_changed(&status([0, 0, 0x01, 0x08]));
    assert!(cover.is_opening());
    assert!(!cover.is_closing());
    assert!(!cover.is_closed());
}

#[test]
fn open_command_sends_runtime_with_overrun() {
    let (mut cover, mut rx) = create_cover(TravelTimes::new(Some(25), Some(24)));
    cover.open_cover().unwrap();
    assert!(cover.is_opening());

    assert_eq!(
        rx.try_recv().unwrap(),
        Telegram::FourBs {
            address: SENDER,
            data: [0, 26, 0x01, 0x08],
        }
    );
}

#[test]
fn close_command_without_times_uses_sentinel() {
    let (mut cover, mut rx) = create_cover(TravelTimes::default());
    cover.close_cover().unwrap();
    assert!(cover.is_closing());

    assert_eq!(
        rx.try_recv().unwrap(),
        Telegram::FourBs {
            address: SENDER,
            data: [0, 255, 0x02, 0x08],
        }
    );
}

#[test]
fn stop_command_clears_motion_flags() {
    let (mut cover, mut rx) = create_cover(TravelTimes::new(Some(25), Some(24)));
    cover.close_cover().unwrap();
    let _ = rx.try_recv().unwrap();

    cover.stop_cover().unwrap();
    assert!(!cover.is_closing());
    assert!(!cover.is_opening());
    assert_eq!(
        rx.try_recv().unwrap(),
        Telegram::FourBs {
            address: SENDER,
            data: [0, 0, 0x00, 0x08],
        }
    );
}

#[test]
fn set_position_is_proportional() {
    let (mut cover, mut rx) = create_cover(TravelTimes::new(Some(20), Some(10)));

    // From 100 down to 50: half of the 10 s closing travel
    cover.set_cover_position(50).unwrap();
    assert!(cover.is_closing());
    assert_eq!(
        rx.try_recv().unwrap(),
        Telegram::FourBs {
            address: SENDER,
            data: [0, 5, 0x02, 0x08],
        }
    );
}

#[test]
fn set_position_to_current_sends_nothing() {
    let (mut cover, mut rx) = create_cover(TravelTimes::new(Some(20), Some(10)));
    cover.set_cover_position(100).unwrap();
    assert!(rx.try_recv().is_err());
}

#[test]
fn set_position_requires_travel_times() {
    let (mut cover, mut rx) = create_cover(TravelTimes::new(Some(20), None));
    assert!(!cover.supports_set_position());
    cover.set_cover_position(40).unwrap();
    assert!(rx.try_recv().is_err());
    assert!(!cover.is_closing());
    assert!(!cover.is_opening());
}

#[test]
fn decode_failure_keeps_state() {
    let (mut cover, _rx) = create_cover(TravelTimes::new(Some(20), Some(20)));
    cover.value_changed(&status([0, 0, 0x50, 0x08]));
    assert!(cover.is_closed());

    // unknown state code is dropped
    cover.value_changed(&status([0, 0, 0x33, 0x08]));
    assert!(cover.is_closed());
    assert_eq!(cover.position(), 0);
}

#[test]
fn state_json_exposes_platform_attributes() {
    let (cover, _rx) = create_cover(TravelTimes::new(Some(25), Some(24)));
    let state = cover.state_json();
    assert_eq!(state["position"], 100);
    assert_eq!(state["is_closed"], false);
    assert_eq!(state["device_class"], "shutter");
    assert_eq!(state["supports_set_position"], true);
}

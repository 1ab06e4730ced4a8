#![no_main]
use libfuzzer_sys::fuzz_target;
use sirocco::profile::{Profile, ProfileId};
use sirocco::telegram::Telegram;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a profile identifier
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(id) = ProfileId::parse(text) {
            let _ = Profile::find(&id);
        }
    }

    if data.len() < 8 {
        return;
    }
    let address = [data[0], data[1], data[2], data[3]];
    let telegrams = [
        Telegram::Rps {
            address,
            data: data[4],
            status: data[5],
        },
        Telegram::OneBs {
            address,
            data: data[4],
        },
        Telegram::FourBs {
            address,
            data: [data[4], data[5], data[6], data[7]],
        },
    ];

    // Exercise every decoder against every organization
    for telegram in telegrams {
        let _ = Profile::RockerSwitch.decode(&telegram);
        let _ = Profile::SingleContact.decode(&telegram);
        let _ = Profile::TemperatureController.decode(&telegram);
        let _ = Profile::ShutterStatus.decode(&telegram);
        let _ = Profile::ShutterCommand.decode(&telegram);
    }
});

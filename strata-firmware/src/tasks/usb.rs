//! USB HID endpoint
//!
//! Exposes two HID interfaces to the host: a boot keyboard and a
//! consumer-control device. Reports arrive ready-made from the engine
//! over [`HID_CHANNEL`]; this task only frames and ships them.

use defmt::*;
use embassy_futures::join::join;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::Builder;
use usbd_hid::descriptor::{KeyboardReport, MediaKeyboardReport, SerializedDescriptor};

use crate::channels::{HidOp, HID_CHANNEL};

/// USB task: runs the device stack and forwards HID reports
#[embassy_executor::task]
pub async fn usb_task(driver: Driver<'static, USB>) {
    info!("USB task started");

    let mut config = embassy_usb::Config::new(0x16C0, 0x27DB);
    config.manufacturer = Some("Strata");
    config.product = Some("Strata Pad");
    config.serial_number = Some("0001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let mut config_descriptor = [0u8; 256];
    let mut bos_descriptor = [0u8; 256];
    let mut msos_descriptor = [0u8; 256];
    let mut control_buf = [0u8; 64];

    let mut keyboard_state = State::new();
    let mut consumer_state = State::new();

    let mut builder = Builder::new(
        driver,
        config,
        &mut config_descriptor,
        &mut bos_descriptor,
        &mut msos_descriptor,
        &mut control_buf,
    );

    let keyboard_config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: 10,
        max_packet_size: 8,
    };
    let mut keyboard: HidWriter<'_, _, 8> = HidWriter::new(&mut builder, &mut keyboard_state, keyboard_config);

    let consumer_config = HidConfig {
        report_descriptor: MediaKeyboardReport::desc(),
        request_handler: None,
        poll_ms: 10,
        max_packet_size: 8,
    };
    let mut consumer: HidWriter<'_, _, 8> = HidWriter::new(&mut builder, &mut consumer_state, consumer_config);

    let mut usb = builder.build();
    let usb_future = usb.run();

    let report_future = async {
        loop {
            match HID_CHANNEL.receive().await {
                HidOp::Keyboard { modifiers, keys } => {
                    let report = KeyboardReport {
                        modifier: modifiers,
                        reserved: 0,
                        leds: 0,
                        keycodes: keys,
                    };
                    if let Err(e) = keyboard.write_serialize(&report).await {
                        warn!("keyboard report dropped: {:?}", e);
                    }
                }
                HidOp::Consumer(usage_id) => {
                    let report = MediaKeyboardReport { usage_id };
                    if let Err(e) = consumer.write_serialize(&report).await {
                        warn!("consumer report dropped: {:?}", e);
                    }
                }
            }
        }
    };

    join(usb_future, report_future).await;
}

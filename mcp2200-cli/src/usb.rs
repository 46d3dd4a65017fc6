use mcp2200_hal::SimpleIo;

pub(crate) fn list(io: &SimpleIo) {
    if io.device_count() == 0 {
        println!("No devices found.");
        return;
    }
    for index in 0..io.device_count() {
        println!("{index}: {}", io.device_info(index));
    }
}

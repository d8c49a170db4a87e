fn main() {
    // Host builds (tests, clippy) run with the espidf feature off and have
    // no ESP-IDF sysenv to export; only the firmware build links the IDF.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}

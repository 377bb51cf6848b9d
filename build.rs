fn main() {
    // ESP-IDF link args and sysenv only matter for firmware builds; host
    // builds (library, tests, parkctl) skip them entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Both client and server stubs are generated: the client side drives
    // the production xDS client, the server side backs the in-process fake
    // discovery server used by xdsc-test's end-to-end reconnect tests.
    tonic_build::configure().compile_protos(&["proto/discovery.proto"], &["proto"])?;
    Ok(())
}

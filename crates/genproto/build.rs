use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = "src/gen";

    fs::create_dir_all(out_dir)?;

    let mut config = prost_build::Config::new();
    match std::env::var_os("PROTOC") {
        Some(protoc) => config.protoc_executable(protoc),
        None => config.protoc_executable(
            protoc_bin_vendored::protoc_bin_path().map_err(|e| e.to_string())?,
        ),
    };

    tonic_prost_build::configure()
        .build_server(true)
        .out_dir(out_dir)
        .compile_with_config(
            config,
            &[
                // order proto (served)
                "../../proto/order/common.proto",
                "../../proto/order/command.proto",
                "../../proto/order/query.proto",
                // account proto (consumed)
                "../../proto/account/account.proto",
                // product proto (consumed)
                "../../proto/product/product.proto",
            ],
            &["../../proto"],
        )?;

    println!("cargo:rerun-if-changed=../../proto");

    Ok(())
}

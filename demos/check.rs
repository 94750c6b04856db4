use vies_http::{ClientOptions, VatClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(country), Some(number)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: check <country-code> <vat-number>");
    };

    let client = VatClient::connect(ClientOptions::default()).await?;
    let details = client.fetch_details(number, &country).await?;

    println!("valid:   {}", details.is_valid());
    if let Some(name) = details.name() {
        println!("name:    {name}");
    }
    if let Some(address) = details.address() {
        println!("address: {address}");
    }

    client.close();
    Ok(())
}

use bizadmin_api::types::{
    BankAccount, Contract, ContractStatus, ListEnvelope, Receipt, ReceiptType, Response,
};
use chrono::NaiveDate;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_contracts_full() {
    let json = load_fixture("contracts.json");
    let resp: ListEnvelope<Contract> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.items().len(), 2);

    let page = resp.data.as_ref().unwrap();
    assert_eq!(page.page_number, Some(1));
    assert_eq!(page.page_size, Some(10));
    assert_eq!(page.total_pages, Some(3));
    assert_eq!(page.total_record, Some(25));

    let contract = &resp.items()[0];
    assert_eq!(contract.id, "ct-1001");
    assert_eq!(contract.contract_number, "HD-2024-001");
    assert_eq!(contract.customer_name.as_deref(), Some("Minh Phat Trading"));
    assert_eq!(contract.sign_date, NaiveDate::from_ymd_opt(2024, 2, 1));
    assert_eq!(contract.status, Some(ContractStatus::Active));

    let draft = &resp.items()[1];
    assert!(draft.customer_name.is_none());
    assert_eq!(draft.total_value, 0.0);
}

#[test]
fn deserialize_contracts_empty() {
    let json = load_fixture("contracts_minimal.json");
    let resp: ListEnvelope<Contract> = serde_json::from_str(&json).unwrap();
    assert!(resp.items().is_empty());
    assert_eq!(resp.data.unwrap().total_record, Some(0));
}

#[test]
fn deserialize_envelope_with_missing_page_fields() {
    let resp: ListEnvelope<Contract> =
        serde_json::from_str(r#"{"statusCode":200,"message":"ok","data":{}}"#).unwrap();
    let page = resp.data.unwrap();
    assert!(page.items.is_none());
    assert!(page.page_number.is_none());
    assert!(page.total_pages.is_none());
}

#[test]
fn deserialize_receipts() {
    let json = load_fixture("receipts.json");
    let resp: ListEnvelope<Receipt> = serde_json::from_str(&json).unwrap();
    let receipt = &resp.items()[0];
    assert_eq!(receipt.receipt_type, ReceiptType::Income);
    assert_eq!(receipt.amount, 15000000.0);
    assert_eq!(receipt.bank_account_id.as_deref(), Some("ba-1"));
}

#[test]
fn deserialize_bank_accounts() {
    let json = load_fixture("bank_accounts.json");
    let resp: ListEnvelope<BankAccount> = serde_json::from_str(&json).unwrap();
    let account = &resp.items()[0];
    assert_eq!(account.bank_name, "Vietcombank");
    assert!(account.created_at.is_some());
}

#[test]
fn deserialize_contract_detail() {
    let json = load_fixture("contract_detail.json");
    let resp: Response<Contract> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.contract_type.as_deref(), Some("service"));
    assert_eq!(resp.data.expiry_date, NaiveDate::from_ymd_opt(2025, 1, 31));
}
